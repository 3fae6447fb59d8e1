pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_LOG_ANSI: bool = true;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_DB_MIN_IDLE: u32 = 1;
pub const DEFAULT_LIST_NAME: &str = "Personal";
pub const DEFAULT_LIST_DESCRIPTION: &str = "Default list created automatically";
