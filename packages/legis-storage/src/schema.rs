pub fn render_schema() -> &'static str {
	include_str!("../../../sql/init.sql")
}

/// Statements of the bootstrap schema, in order, without empty fragments.
pub fn statements() -> impl Iterator<Item = &'static str> {
	render_schema().split(';').map(str::trim).filter(|statement| !statement.is_empty())
}

#[cfg(test)]
mod tests {
	#[test]
	fn schema_creates_sessions_table() {
		let statements: Vec<_> = super::statements().collect();

		assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS legis_sessions"));
		assert_eq!(statements.len(), 2);
	}
}
