use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use fcf::firestore::{DecodeOptions, Dynamic, Event, Result};
use serde_json::{Map, Value as JsonValue};
use time::format_description::well_known::Rfc3339;

/// Output truncation limits for decoded trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/maps.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 8,
		}
	}
}

/// Decode one side of an event into a dynamic tree and print it.
pub fn run(path: PathBuf, old: bool, json: bool, strict: bool) -> Result<()> {
	let event = Event::from_path(&path)?;
	let side = if old { &event.old_value } else { &event.value };
	let options = if strict { DecodeOptions::strict() } else { DecodeOptions::default() };

	let mut tree = Dynamic::Null;
	side.decode_with(&mut tree, &options)?;

	if json {
		let payload = serde_json::json!({
			"path": path.display().to_string(),
			"document": side.document_path(),
			"value": dynamic_to_json(&tree),
		});
		println!("{}", serde_json::to_string_pretty(&payload)?);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("side: {}", if old { "old_value" } else { "value" });
	println!("document: {}", side.document_path().unwrap_or("-"));
	println!("decoded:");
	print_value(&tree, 0, 0, PrintOptions::default());

	Ok(())
}

fn print_value(value: &Dynamic, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Dynamic::Null => println!("{pad}null"),
		Dynamic::Bool(v) => println!("{pad}{v}"),
		Dynamic::Int(v) => println!("{pad}{v}"),
		Dynamic::Float(v) => println!("{pad}{v}"),
		Dynamic::String(v) => println!("{pad}\"{}\"", truncate(v, options.max_string_len)),
		Dynamic::Bytes(v) => println!("{pad}bytes[{}]", v.len()),
		Dynamic::Timestamp(v) => println!("{pad}{}", v.format(&Rfc3339).unwrap_or_else(|_| v.to_string())),
		Dynamic::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{pad}  ... {} more", items.len() - options.max_array_items);
			}
			println!("{pad}]");
		}
		Dynamic::Map(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{ ... }}");
				return;
			}
			println!("{pad}{{");
			for (key, item) in entries {
				print!("{pad}  {key} = ");
				if matches!(item, Dynamic::Map(_) | Dynamic::Array(_)) {
					println!();
					print_value(item, indent + 4, depth + 1, options);
				} else {
					print_value(item, 0, depth + 1, options);
				}
			}
			println!("{pad}}}");
		}
	}
}

fn dynamic_to_json(value: &Dynamic) -> JsonValue {
	match value {
		Dynamic::Null => JsonValue::Null,
		Dynamic::Bool(v) => serde_json::json!(v),
		Dynamic::Int(v) => serde_json::json!(v),
		Dynamic::Float(v) => serde_json::Number::from_f64(*v).map_or_else(|| serde_json::json!(v.to_string()), JsonValue::Number),
		Dynamic::String(v) => serde_json::json!(v),
		Dynamic::Bytes(v) => serde_json::json!(BASE64.encode(v)),
		Dynamic::Timestamp(v) => serde_json::json!(v.format(&Rfc3339).unwrap_or_else(|_| v.to_string())),
		Dynamic::Array(items) => JsonValue::Array(items.iter().map(dynamic_to_json).collect()),
		Dynamic::Map(entries) => {
			let fields: Map<String, JsonValue> = entries.iter().map(|(key, item)| (key.clone(), dynamic_to_json(item))).collect();
			JsonValue::Object(fields)
		}
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
