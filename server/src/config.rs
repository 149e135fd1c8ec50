use clap::Parser;

/// Runtime configuration. Every option can come from the command line or
/// the environment; all have defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "HTTP/JSON todo service backed by SQLite")]
pub struct Config {
    /// SQLite file path or `sqlite:` DSN
    #[arg(long, env = "DB_PATH", default_value = "todo.db")]
    pub db_path: String,

    /// Interface to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
