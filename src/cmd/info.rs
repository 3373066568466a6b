use std::path::PathBuf;

use fcf::firestore::{Event, Result, Tag, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Print envelope metadata and the top-level field tags of both sides.
pub fn run(path: PathBuf) -> Result<()> {
	let event = Event::from_path(&path)?;

	println!("path: {}", path.display());
	println!("kind: {}", event_kind(&event));
	print_side("value", &event.value);
	print_side("old_value", &event.old_value);

	println!("update_mask:");
	for field_path in &event.update_mask.field_paths {
		println!("  {field_path}");
	}

	Ok(())
}

fn event_kind(event: &Event) -> &'static str {
	match (event.old_value.is_empty(), event.value.is_empty()) {
		(true, false) => "create",
		(false, true) => "delete",
		(false, false) => "update",
		(true, true) => "empty",
	}
}

fn print_side(label: &str, value: &Value) {
	println!("{label}:");
	if value.is_empty() {
		println!("  (none)");
		return;
	}
	println!("  name: {}", value.name);
	println!("  document: {}", value.document_path().unwrap_or("-"));
	println!("  create_time: {}", time_label(value.create_time));
	println!("  update_time: {}", time_label(value.update_time));
	println!("  fields: {}", value.fields.len());

	let mut names: Vec<_> = value.fields.keys().collect();
	names.sort();
	for name in names {
		println!("    {name}: {}", tag_label(&value.fields[name.as_str()]));
	}
}

fn tag_label(node: &serde_json::Value) -> &'static str {
	match node.as_object().and_then(|wrapper| wrapper.keys().next()).and_then(|key| Tag::from_key(key)) {
		Some(tag) => tag.as_str(),
		None => "?",
	}
}

fn time_label(time: Option<OffsetDateTime>) -> String {
	time.and_then(|time| time.format(&Rfc3339).ok()).unwrap_or_else(|| "-".to_owned())
}
