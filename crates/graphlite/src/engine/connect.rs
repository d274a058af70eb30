use super::Engine;
use graphlite_core::{Error, Result, Schema};

use url::Url;

impl Engine {
    /// Opens the database named by `url` and creates any missing tables.
    ///
    /// Supported schemes: `sqlite` (`sqlite::memory:` or `sqlite:<path>`).
    pub fn connect(schema: Schema, url: &str) -> Result<Engine> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::driver_operation_failed(err)
                .context(Error::invalid_connection_url(format!("url={url}")))
        })?;

        match parsed.scheme() {
            "sqlite" => connect_sqlite(schema, url),
            scheme => Err(Error::invalid_connection_url(format!(
                "unsupported database; scheme={scheme}; url={url}"
            ))),
        }
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(schema: Schema, url: &str) -> Result<Engine> {
    let driver = graphlite_driver_sqlite::Sqlite::new(url)?;
    driver.push_schema(&schema)?;
    Engine::new(schema, driver)
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_schema: Schema, _url: &str) -> Result<Engine> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}
