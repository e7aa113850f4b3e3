/// Default category table compiled into the binary.
pub const BUILTIN_TABLE_TOML: &str = include_str!("../../data/categories.toml");
