use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

// Registration only fails on duplicate names, which is a programming error
lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("creatorbrief_requests_total", "Total number of completion requests")
            .expect("register creatorbrief_requests_total");
    pub static ref CACHE_HITS: Counter =
        register_counter!("creatorbrief_cache_hits_total", "Total cache hits")
            .expect("register creatorbrief_cache_hits_total");
    pub static ref CACHE_MISSES: Counter =
        register_counter!("creatorbrief_cache_misses_total", "Total cache misses")
            .expect("register creatorbrief_cache_misses_total");
    pub static ref RATE_LIMITED: Counter =
        register_counter!("creatorbrief_rate_limited_total", "Requests refused by the rate limiter")
            .expect("register creatorbrief_rate_limited_total");
    pub static ref PROVIDER_ERRORS: Counter =
        register_counter!("creatorbrief_provider_errors_total", "Failed provider calls")
            .expect("register creatorbrief_provider_errors_total");
    pub static ref PROVIDER_LATENCY: Histogram = register_histogram!(
        "creatorbrief_provider_latency_seconds",
        "Provider call latency in seconds"
    )
    .expect("register creatorbrief_provider_latency_seconds");
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("creatorbrief_cache_size", "Current number of items in cache")
            .expect("register creatorbrief_cache_size");
}

// Text exposition of everything in the default registry
pub fn render() -> Result<String, prometheus::Error> {
    use prometheus::{Encoder, TextEncoder};

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
