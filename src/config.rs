use std::{env, net::SocketAddr, path::PathBuf};

use crate::{error::AppError, services::optimizer::Strategy};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub debug: bool,
    pub static_dir: PathBuf,
    pub plan_strategy: Strategy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr = match env::var("APP_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?,
            Err(_) => {
                let port: u16 = env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .map_err(|err| AppError::Config(format!("invalid PORT: {err}")))?;
                let host = if flag("LISTEN_ALL") {
                    "0.0.0.0".to_string()
                } else {
                    env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
                };
                format!("{host}:{port}")
                    .parse()
                    .map_err(|err| AppError::Config(format!("invalid HOST: {err}")))?
            }
        };

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let plan_strategy = match env::var("PLAN_STRATEGY") {
            Ok(raw) => parse_strategy(&raw)?,
            Err(_) => Strategy::default(),
        };

        Ok(Self {
            listen_addr,
            debug: flag("DEBUG"),
            static_dir,
            plan_strategy,
        })
    }
}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn parse_strategy(raw: &str) -> Result<Strategy, AppError> {
    raw.trim()
        .parse()
        .map_err(|err| AppError::Config(format!("invalid PLAN_STRATEGY: {err}")))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
