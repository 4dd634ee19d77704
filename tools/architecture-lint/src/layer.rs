//! Hexagon layers of the `cep-weather` crate and the dependencies each may
//! not take.

use std::path::Path;

/// A layer of the service crate, inferred from a file's top-level module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Value types, services and port traits.
    Domain,
    /// HTTP handlers and error mapping.
    Inbound,
    /// Provider and forwarder adapters.
    Outbound,
    /// Request middleware shared by both services.
    Middleware,
}

struct Rules {
    modules: &'static [&'static str],
    crates: &'static [&'static str],
}

const DOMAIN: Rules = Rules {
    modules: &["config", "inbound", "middleware", "outbound", "server", "telemetry"],
    crates: &[
        "actix_service",
        "actix_web",
        "opentelemetry",
        "opentelemetry_otlp",
        "opentelemetry_sdk",
        "reqwest",
        "tracing_opentelemetry",
        "utoipa",
    ],
};

const INBOUND: Rules = Rules {
    modules: &["outbound", "server"],
    crates: &["opentelemetry_otlp", "opentelemetry_sdk", "reqwest", "wiremock"],
};

const OUTBOUND: Rules = Rules {
    modules: &["inbound", "middleware", "server"],
    crates: &["actix_service", "actix_web", "utoipa"],
};

const MIDDLEWARE: Rules = Rules {
    modules: &["inbound", "outbound", "server"],
    crates: &["reqwest"],
};

impl Layer {
    /// Layer owning `relative_path` (relative to `src/`), if any.
    ///
    /// Files outside the four layers belong to the composition root and
    /// are not linted.
    pub fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        match first {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            "middleware" => Some(Self::Middleware),
            _ => None,
        }
    }

    /// Module name of the layer.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Middleware => "middleware",
        }
    }

    const fn rules(self) -> &'static Rules {
        match self {
            Self::Domain => &DOMAIN,
            Self::Inbound => &INBOUND,
            Self::Outbound => &OUTBOUND,
            Self::Middleware => &MIDDLEWARE,
        }
    }

    /// Whether the layer may not reference crate-level module `root`.
    pub fn forbids_module(self, root: &str) -> bool {
        self.rules().modules.contains(&root)
    }

    /// Whether the layer may not reference external crate `root`.
    pub fn forbids_crate(self, root: &str) -> bool {
        self.rules().crates.contains(&root)
    }
}
