#![allow(missing_docs)]
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use oapi_scope_core::AudienceFilter;
use tracing::{info, warn};
use url::Url;

use oapi_scope_server::{AppState, FileDocumentProvider, HttpDocumentProvider, run};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().pretty().init();

    let AppArgs {
        host,
        port,
        source,
        security_scheme,
    } = AppArgs::parse(pico_args::Arguments::from_env()).context("parsing arguments")?;
    let addr = SocketAddr::from((host, port));

    let filter = match security_scheme {
        Some(name) => AudienceFilter::builder()
            .with_security_scheme_name(name)
            .build(),
        None => AudienceFilter::default(),
    };

    match source {
        DocumentSource::File(path) => {
            info!(path = %path.display(), "serving views of a document file");
            run(addr, AppState::new(FileDocumentProvider::new(path), filter)).await?;
        }
        DocumentSource::Upstream(upstream) => {
            info!(%upstream, "serving views of an upstream document");
            run(addr, AppState::new(HttpDocumentProvider::new(upstream), filter)).await?;
        }
    }

    info!("Bye!");
    Ok(())
}

/// Where the canonical document is read from.
#[derive(Debug, PartialEq)]
enum DocumentSource {
    File(PathBuf),
    Upstream(Url),
}

#[derive(Debug)]
struct AppArgs {
    host: IpAddr,
    port: u16,
    source: DocumentSource,
    security_scheme: Option<String>,
}

impl AppArgs {
    fn parse(mut pargs: pico_args::Arguments) -> Result<Self> {
        let host = pargs
            .opt_value_from_str(["-h", "--host"])
            .context("parsing host argument")?;

        let port = pargs
            .opt_value_from_str(["-p", "--port"])
            .context("parsing port argument")?;

        let upstream: Option<Url> = pargs
            .opt_value_from_str(["-u", "--upstream"])
            .context("parsing upstream argument")?;

        let document: Option<PathBuf> = pargs
            .opt_value_from_str(["-d", "--document"])
            .context("parsing document argument")?;

        let security_scheme = pargs
            .opt_value_from_str("--security-scheme")
            .context("parsing security scheme argument")?;

        let source = match (document, upstream) {
            (Some(_), Some(_)) => bail!("--document and --upstream cannot be used together"),
            (Some(path), None) => DocumentSource::File(path),
            (None, Some(upstream)) => DocumentSource::Upstream(upstream),
            (None, None) => DocumentSource::Upstream(
                Url::parse(HttpDocumentProvider::DEFAULT_URL).context("default upstream")?,
            ),
        };

        let result = Self {
            host: host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: port.unwrap_or(8080),
            source,
            security_scheme,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            warn!(?remaining, "Warning: unused arguments left");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    fn parse(args: &[&str]) -> Result<AppArgs> {
        AppArgs::parse(pico_args::Arguments::from_vec(
            args.iter().map(OsString::from).collect(),
        ))
    }

    #[test]
    fn should_default_to_local_backend() {
        let args = parse(&[]).expect("default arguments");

        assert_eq!(args.port, 8080);
        assert_eq!(
            args.source,
            DocumentSource::Upstream(
                Url::parse("http://localhost:8085/openapi.json").expect("valid url")
            )
        );
    }

    #[test]
    fn should_read_document_file() {
        let args = parse(&["--document", "openapi.json", "-p", "9000"]).expect("arguments");

        assert_eq!(args.port, 9000);
        assert_eq!(args.source, DocumentSource::File(PathBuf::from("openapi.json")));
    }

    #[test]
    fn should_reject_document_with_upstream() {
        let error = parse(&[
            "--document",
            "openapi.json",
            "--upstream",
            "http://backend:8085/openapi.json",
        ])
        .expect_err("conflicting sources");

        assert!(error.to_string().contains("cannot be used together"));
    }
}
