#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap};

use fcf::firestore::{Dynamic, GeoPoint, Value};
use serde_json::{Value as JsonValue, json};

#[derive(Debug, Default, Clone, PartialEq)]
struct Elems {
	elem0: String,
	elem1: String,
	elem2: String,
}

fcf::decode_struct!(Elems {
	elem0 as "Elem0",
	elem1 as "Elem1",
	elem2 as "Elem2",
});

fn inner_fields() -> JsonValue {
	json!({
		"Elem0": {"stringValue": "foo"},
		"Elem1": {"stringValue": "bar"},
		"Elem2": {"stringValue": "baz"},
	})
}

fn expected_inner() -> HashMap<String, String> {
	HashMap::from([
		("Elem0".to_owned(), "foo".to_owned()),
		("Elem1".to_owned(), "bar".to_owned()),
		("Elem2".to_owned(), "baz".to_owned()),
	])
}

#[test]
fn map_into_struct_mapping_and_dynamic() {
	#[derive(Debug, Default)]
	struct Doc {
		as_struct: Elems,
		as_dynamic: Dynamic,
		as_dynamic_map: HashMap<String, Dynamic>,
		as_strings: BTreeMap<String, String>,
	}
	fcf::decode_struct!(Doc {
		as_struct as "Field",
		as_dynamic as "Field",
		as_dynamic_map as "Field",
		as_strings as "Field",
	});

	let mut out = Doc::default();
	value(json!({"Field": {"mapValue": {"fields": inner_fields()}}}))
		.decode(&mut out)
		.expect("decodes");

	assert_eq!(
		out.as_struct,
		Elems {
			elem0: "foo".to_owned(),
			elem1: "bar".to_owned(),
			elem2: "baz".to_owned(),
		}
	);
	assert_eq!(out.as_dynamic.get("Elem1").and_then(Dynamic::as_str), Some("bar"));
	assert_eq!(out.as_dynamic_map.len(), 3);
	assert_eq!(out.as_dynamic_map["Elem2"], Dynamic::from("baz"));
	assert_eq!(out.as_strings.into_iter().collect::<HashMap<_, _>>(), expected_inner());
}

#[test]
fn heterogeneous_map_into_dynamic_map() {
	#[derive(Debug, Default)]
	struct Doc {
		field: HashMap<String, Dynamic>,
	}
	fcf::decode_struct!(Doc { field });

	let mut out = Doc::default();
	value(json!({"field": {"mapValue": {"fields": {
		"name": {"stringValue": "foo"},
		"count": {"integerValue": "3"},
		"ok": {"booleanValue": true},
	}}}}))
	.decode(&mut out)
	.expect("decodes");
	assert_eq!(out.field["name"], Dynamic::from("foo"));
	assert_eq!(out.field["count"], Dynamic::Int(3));
	assert_eq!(out.field["ok"], Dynamic::Bool(true));
}

#[test]
fn nested_map_into_every_destination_shape() {
	#[derive(Debug, Default)]
	struct Outer {
		inner: Elems,
		i1: Dynamic,
		i2: HashMap<String, Dynamic>,
		i3: HashMap<String, String>,
	}
	fcf::decode_struct!(Outer {
		inner as "Inner",
		i1 as "Inner",
		i2 as "Inner",
		i3 as "Inner",
	});

	#[derive(Debug, Default)]
	struct Doc {
		s: Outer,
		o1: Dynamic,
		o2: HashMap<String, Dynamic>,
		o3: HashMap<String, HashMap<String, Dynamic>>,
		o4: HashMap<String, HashMap<String, String>>,
		o5: HashMap<String, Elems>,
		o6: HashMap<String, Option<Box<Elems>>>,
	}
	fcf::decode_struct!(Doc {
		s as "Outer",
		o1 as "Outer",
		o2 as "Outer",
		o3 as "Outer",
		o4 as "Outer",
		o5 as "Outer",
		o6 as "Outer",
	});

	let mut out = Doc::default();
	value(json!({"Outer": {"mapValue": {"fields": {
		"Inner": {"mapValue": {"fields": inner_fields()}},
	}}}}))
	.decode(&mut out)
	.expect("decodes");

	assert_eq!(out.s.inner.elem0, "foo");
	assert_eq!(out.s.inner.elem2, "baz");
	assert_eq!(out.s.i1.get("Elem1"), Some(&Dynamic::from("bar")));
	assert_eq!(out.s.i2["Elem0"], Dynamic::from("foo"));
	assert_eq!(out.s.i3, expected_inner());

	assert_eq!(out.o1.get("Inner").and_then(|inner| inner.get("Elem2")), Some(&Dynamic::from("baz")));
	assert_eq!(out.o2["Inner"].get("Elem0"), Some(&Dynamic::from("foo")));
	assert_eq!(out.o3["Inner"]["Elem1"], Dynamic::from("bar"));
	assert_eq!(out.o4["Inner"], expected_inner());
	assert_eq!(out.o5["Inner"].elem1, "bar");
	assert_eq!(out.o6["Inner"].as_deref().map(|elems| elems.elem0.as_str()), Some("foo"));
}

#[test]
fn array_into_strings_and_dynamic() {
	#[derive(Debug, Default)]
	struct Doc {
		list: Vec<String>,
		dynamic: Vec<Dynamic>,
		open: Dynamic,
	}
	fcf::decode_struct!(Doc {
		list as "Field",
		dynamic as "Field",
		open as "Field",
	});

	let mut out = Doc {
		list: vec!["stale".to_owned(); 5],
		..Doc::default()
	};
	value(json!({"Field": {"arrayValue": {"values": [
		{"stringValue": "elem0"},
		{"stringValue": "elem1"},
		{"stringValue": "elem2"},
	]}}}))
	.decode(&mut out)
	.expect("decodes");

	assert_eq!(out.list, ["elem0", "elem1", "elem2"]);
	assert_eq!(out.dynamic.len(), 3);
	assert_eq!(out.dynamic[1], Dynamic::from("elem1"));
	assert_eq!(out.open.as_array().map(<[Dynamic]>::len), Some(3));
	assert_eq!(out.open.as_array(), Some(&out.dynamic[..]));
	assert_eq!(out.dynamic.iter().filter_map(Dynamic::as_str).collect::<Vec<_>>(), out.list);
}

#[test]
fn array_of_maps_into_structs() {
	#[derive(Debug, Default)]
	struct Doc {
		items: Vec<Elems>,
	}
	fcf::decode_struct!(Doc { items });

	let mut out = Doc::default();
	value(json!({"items": {"arrayValue": {"values": [
		{"mapValue": {"fields": inner_fields()}},
		{"mapValue": {"fields": {"Elem1": {"stringValue": "only"}}}},
	]}}}))
	.decode(&mut out)
	.expect("decodes");

	assert_eq!(out.items.len(), 2);
	assert_eq!(out.items[0].elem2, "baz");
	assert_eq!(out.items[1].elem0, "");
	assert_eq!(out.items[1].elem1, "only");
}

#[test]
fn empty_containers_clear_destinations() {
	#[derive(Debug, Default)]
	struct Doc {
		list: Vec<i64>,
		map: HashMap<String, i64>,
		open: Dynamic,
	}
	fcf::decode_struct!(Doc { list, map, open });

	let mut out = Doc {
		list: vec![1, 2],
		open: Dynamic::from("stale"),
		..Doc::default()
	};
	value(json!({
		"list": {"arrayValue": {}},
		"map": {"mapValue": {}},
		"open": {"mapValue": {"fields": {}}},
	}))
	.decode(&mut out)
	.expect("decodes");

	assert!(out.list.is_empty());
	assert!(out.map.is_empty());
	assert_eq!(out.open.as_map().map(BTreeMap::len), Some(0));
}

#[test]
fn typed_map_keeps_entries_missing_from_the_wire() {
	#[derive(Debug, Default)]
	struct Doc {
		counts: HashMap<String, i64>,
	}
	fcf::decode_struct!(Doc { counts });

	let mut out = Doc {
		counts: HashMap::from([("kept".to_owned(), 1), ("updated".to_owned(), 2)]),
	};
	value(json!({"counts": {"mapValue": {"fields": {"updated": {"integerValue": "20"}, "new": {"integerValue": "30"}}}}}))
		.decode(&mut out)
		.expect("decodes");
	assert_eq!(out.counts, HashMap::from([("kept".to_owned(), 1), ("updated".to_owned(), 20), ("new".to_owned(), 30)]));
}

#[test]
fn geo_point_into_declared_and_narrow_structs() {
	#[derive(Debug, Default)]
	struct Narrow {
		lat: f32,
		long: f32,
	}
	fcf::decode_struct!(Narrow {
		lat as "latitude",
		long as "longitude",
	});

	#[derive(Debug, Default)]
	struct Doc {
		point: GeoPoint,
		narrow: Narrow,
		open: Dynamic,
	}
	fcf::decode_struct!(Doc {
		point as "Field",
		narrow as "Field",
		open as "Field",
	});

	let mut out = Doc::default();
	value(json!({"Field": {"geoPointValue": {"latitude": 52.5, "longitude": -13.25}}}))
		.decode(&mut out)
		.expect("decodes");

	assert_eq!(
		out.point,
		GeoPoint {
			latitude: 52.5,
			longitude: -13.25
		}
	);
	assert_eq!((out.narrow.lat, out.narrow.long), (52.5, -13.25));
	assert_eq!(out.open.get("latitude").and_then(Dynamic::as_f64), Some(52.5));
}

#[test]
fn geo_point_with_whole_coordinates_into_integer_fields() {
	#[derive(Debug, Default)]
	struct Grid {
		latitude: i32,
		longitude: i64,
	}
	fcf::decode_struct!(Grid { latitude, longitude });

	#[derive(Debug, Default)]
	struct Doc {
		at: Grid,
	}
	fcf::decode_struct!(Doc { at });

	let mut out = Doc::default();
	value(json!({"at": {"geoPointValue": {"latitude": 52.0, "longitude": -13.0}}}))
		.decode(&mut out)
		.expect("whole coordinates fit integers");
	assert_eq!((out.at.latitude, out.at.longitude), (52, -13));

	let err = value(json!({"at": {"geoPointValue": {"latitude": 52.5, "longitude": 13.0}}}))
		.decode(&mut out)
		.expect_err("fractional coordinate");
	assert_eq!(err.path(), "at.latitude");
}

#[test]
fn boxed_and_optional_nested_structs_are_allocated() {
	#[derive(Debug, Default)]
	struct Doc {
		child: Option<Box<Elems>>,
		absent: Option<Box<Elems>>,
	}
	fcf::decode_struct!(Doc { child, absent });

	let mut out = Doc::default();
	value(json!({"child": {"mapValue": {"fields": {"Elem0": {"stringValue": "x"}}}}}))
		.decode(&mut out)
		.expect("decodes");
	assert_eq!(out.child.as_ref().map(|elems| elems.elem0.as_str()), Some("x"));
	assert!(out.absent.is_none());
}

#[test]
fn whole_document_into_dynamic_root() {
	let mut root: BTreeMap<String, Dynamic> = BTreeMap::new();
	value(json!({
		"name": {"stringValue": "alice"},
		"tags": {"arrayValue": {"values": [{"stringValue": "a"}, {"nullValue": null}]}},
	}))
	.decode(&mut root)
	.expect("decodes");
	assert_eq!(root["name"], Dynamic::from("alice"));
	assert_eq!(root["tags"].as_array().map(|items| items[1].is_null()), Some(true));
}

fn value(fields: JsonValue) -> Value {
	let JsonValue::Object(fields) = fields else {
		panic!("fields fixture must be an object");
	};
	Value {
		fields,
		..Value::default()
	}
}
