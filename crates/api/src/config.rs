use std::time::Duration;

use officehub_core::catalog::CatalogSpec;
use officehub_core::compliance::CompliancePolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except
/// `JWT_SECRET`, which must be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks may drain after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub detection: DetectionConfig,
    pub catalog: CatalogSpec,
    /// Initial administrator, created at startup when configured.
    pub admin: Option<AdminSeed>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    ///
    /// See [`JwtConfig::from_env`], [`DetectionConfig::from_env`],
    /// [`catalog_from_env`] and [`AdminSeed::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            detection: DetectionConfig::from_env(),
            catalog: catalog_from_env(),
            admin: AdminSeed::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mask detection
// ---------------------------------------------------------------------------

/// Default bound on a single detection call, in seconds.
const DEFAULT_DETECTION_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Base URL of the detection service; `None` disables detection.
    pub url: Option<String>,
    pub timeout_secs: u64,
    /// What to record when no verdict is available.
    pub failure_policy: CompliancePolicy,
}

impl DetectionConfig {
    /// | Env Var                    | Default     |
    /// |----------------------------|-------------|
    /// | `DETECTION_URL`            | unset (off) |
    /// | `DETECTION_TIMEOUT_SECS`   | `10`        |
    /// | `DETECTION_FAILURE_POLICY` | `fail_open` |
    pub fn from_env() -> Self {
        let url = std::env::var("DETECTION_URL")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let timeout_secs: u64 = std::env::var("DETECTION_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_DETECTION_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DETECTION_TIMEOUT_SECS must be a valid u64");

        let failure_policy = std::env::var("DETECTION_FAILURE_POLICY")
            .map(|p| {
                p.parse::<CompliancePolicy>()
                    .unwrap_or_else(|e| panic!("DETECTION_FAILURE_POLICY: {e}"))
            })
            .unwrap_or_default();

        Self {
            url,
            timeout_secs,
            failure_policy,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: DEFAULT_DETECTION_TIMEOUT_SECS,
            failure_policy: CompliancePolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Load the catalog shape, falling back to [`CatalogSpec::default`].
///
/// | Env Var                    | Format / Default                          |
/// |----------------------------|-------------------------------------------|
/// | `CATALOG_OFFICES`          | `Name:City,Name:City` (three defaults)    |
/// | `CATALOG_FLOORS_PER_OFFICE`| `3`                                       |
/// | `CATALOG_DESKS_PER_FLOOR`  | `20`                                      |
/// | `CATALOG_ROOMS_PER_FLOOR`  | `4`                                       |
pub fn catalog_from_env() -> CatalogSpec {
    let defaults = CatalogSpec::default();

    let offices = match std::env::var("CATALOG_OFFICES") {
        Ok(raw) => parse_offices(&raw).unwrap_or_else(|e| panic!("CATALOG_OFFICES: {e}")),
        Err(_) => defaults.offices,
    };

    let count = |var: &str, default: u32| -> u32 {
        std::env::var(var)
            .map(|v| {
                v.parse()
                    .unwrap_or_else(|_| panic!("{var} must be a valid u32"))
            })
            .unwrap_or(default)
    };

    CatalogSpec {
        offices,
        floors_per_office: count("CATALOG_FLOORS_PER_OFFICE", defaults.floors_per_office),
        desks_per_floor: count("CATALOG_DESKS_PER_FLOOR", defaults.desks_per_floor),
        rooms_per_floor: count("CATALOG_ROOMS_PER_FLOOR", defaults.rooms_per_floor),
    }
}

/// Parse `Name:City,Name:City`.
fn parse_offices(raw: &str) -> Result<Vec<(String, String)>, String> {
    let offices: Vec<(String, String)> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, city)) if !name.trim().is_empty() && !city.trim().is_empty() => {
                Ok((name.trim().to_string(), city.trim().to_string()))
            }
            _ => Err(format!("expected 'Name:City', got '{entry}'")),
        })
        .collect::<Result<_, _>>()?;
    if offices.is_empty() {
        return Err("at least one office is required".into());
    }
    Ok(offices)
}

// ---------------------------------------------------------------------------
// Admin seed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AdminSeed {
    /// Present only when both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    /// `ADMIN_NAME` defaults to `Administrator`.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok().filter(|e| !e.is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty())?;
        let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into());
        Some(Self {
            email,
            password,
            name,
        })
    }
}
