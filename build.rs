use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for section in ["render", "detect", "normalize"] {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("default_config.toml is missing the [{}] section", section);
        }
    }

    if let Some(sizes) = table
        .get("render")
        .and_then(|render| render.get("heading_sizes"))
        .and_then(toml::Value::as_array)
        && sizes.len() != 6
    {
        panic!(
            "default_config.toml: render.heading_sizes needs 6 entries, found {}",
            sizes.len()
        );
    }
}
