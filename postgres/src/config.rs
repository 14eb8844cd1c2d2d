use core::fmt::Write;

/// Connection settings for [`PostgresConnector`](crate::PostgresConnector).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Passed through as the libpq `options` parameter
    pub options: Option<String>,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "postgres".to_string(),
            user: None,
            password: None,
            options: None,
        }
    }
}

impl PostgresConfig {
    pub fn new(host: impl Into<String>, dbname: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            dbname: dbname.into(),
            ..Self::default()
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// libpq key/value form, e.g. `host=localhost port=5432 dbname=app`.
    pub fn to_connection_string(&self) -> String {
        let mut out = String::with_capacity(64);
        push_param(&mut out, "host", &self.host);
        push_param(&mut out, "port", &self.port.to_string());
        push_param(&mut out, "dbname", &self.dbname);
        if let Some(user) = &self.user {
            push_param(&mut out, "user", user);
        }
        if let Some(password) = &self.password {
            push_param(&mut out, "password", password);
        }
        if let Some(options) = &self.options {
            push_param(&mut out, "options", options);
        }
        out
    }
}

fn push_param(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if needs_quotes {
        let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
        let _ = write!(out, "{key}='{escaped}'");
    } else {
        let _ = write!(out, "{key}={value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_5432() {
        let config = PostgresConfig::new("db.internal", "app");
        assert_eq!(
            config.to_connection_string(),
            "host=db.internal port=5432 dbname=app"
        );
    }

    #[test]
    fn credentials_and_options_are_quoted_when_needed() {
        let config = PostgresConfig::new("localhost", "app")
            .port(6543)
            .user("svc")
            .password("it's secret")
            .options("-c search_path=app");
        assert_eq!(
            config.to_connection_string(),
            r"host=localhost port=6543 dbname=app user=svc password='it\'s secret' options='-c search_path=app'"
        );
    }

    #[test]
    fn empty_password_is_explicit() {
        let config = PostgresConfig::default().password("");
        assert!(config.to_connection_string().ends_with("password=''"));
    }
}
