// Both files are resolved relative to the working directory the binary is
// launched from.
pub const CONFIG_FILE: &str = "config.json";
pub const CREDENTIALS_FILE: &str = "credentials.json";
