use regex::Regex;
use std::{collections::BTreeMap, net::SocketAddr, time::Duration};
use structflags::{validator, Counter, Flags, Options};

/// Configuration for the http listener
#[derive(Debug, Flags)]
pub struct HttpConfig {
    #[tag(desc = "HTTP host", valid = "host")]
    pub host: String,

    /// Port to listen on
    #[tag(flag = "port p", valid = "port")]
    pub port: u16,

    /// Serve over TLS
    pub ssl: bool,

    /// How long to wait for a request
    pub timeout: Duration,

    /// Address of the upstream service
    pub upstream: SocketAddr,
}

/// Solves widget optimization problems on demand as a service
#[derive(Debug, Flags)]
pub struct Config {
    pub http: HttpConfig,

    /// Only requests with matching paths are served
    pub path_filter: Option<Regex>,

    /// Verbosity, repeat for more
    #[tag(flag = "verbose v")]
    pub verbose: Counter,

    /// Peers to which we can try to loadshed
    #[tag(flag = "peer", env = "PEERS")]
    pub peer_urls: Vec<String>,

    /// Labels attached to telemetry
    pub labels: BTreeMap<String, String>,

    #[tag(flag = "old-mode,deprecated", env = "-")]
    pub old_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                host: "127.0.0.1".into(),
                port: 6000,
                ssl: false,
                timeout: Duration::from_secs(15),
                upstream: SocketAddr::from(([127, 0, 0, 1], 4000)),
            },
            path_filter: None,
            verbose: Counter(0),
            peer_urls: Vec::new(),
            labels: BTreeMap::new(),
            old_mode: false,
        }
    }
}

fn main() {
    let mut config = Config::default();
    config
        .flags_builder()
        .name("showcase")
        .about("Solves widget optimization problems on demand as a service")
        .options(
            Options::default()
                .env_prefix("MYCO_")
                .validator(validator::tag_validator(validator::DEFAULT_TAG)),
        )
        .parse();

    println!("host = {}", config.http.host);
    println!("port = {}", config.http.port);
    println!("ssl = {}", config.http.ssl);
    println!("timeout = {:?}", config.http.timeout);
    println!("upstream = {}", config.http.upstream);
    println!(
        "path_filter = {}",
        config.path_filter.as_ref().map(Regex::as_str).unwrap_or_default()
    );
    println!("verbose = {}", config.verbose.0);
    println!("peer_urls = {:?}", config.peer_urls);
    println!("labels = {:?}", config.labels);
}
