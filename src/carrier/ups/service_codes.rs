//! UPS service-code vocabulary.

const SERVICE_NAMES: &[(&str, &str)] = &[
	("01", "Next Day Air"),
	("02", "2nd Day Air"),
	("03", "Ground"),
	("07", "Worldwide Express"),
	("08", "Worldwide Expedited"),
	("11", "Standard"),
	("12", "3 Day Select"),
	("13", "Next Day Air Saver"),
	("14", "UPS Next Day Air Early"),
	("54", "Worldwide Express Plus"),
	("59", "2nd Day Air A.M."),
	("65", "Saver"),
];

/// Looks up the published name of a UPS service code.
pub fn known_service_name(code: &str) -> Option<&'static str> {
	SERVICE_NAMES.iter().find(|(known, _)| *known == code).map(|(_, name)| *name)
}

/// Resolves a service code to a display name, falling back to `<carrier> Service <code>`.
pub fn service_name(carrier: &str, code: &str) -> String {
	match known_service_name(code) {
		Some(name) => name.to_owned(),
		None => format!("{carrier} Service {code}"),
	}
}
