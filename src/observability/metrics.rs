use prometheus::{
    Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub dispatch_ops_total: IntCounterVec,
    pub auto_assign_latency_seconds: HistogramVec,
    pub assignable_couriers: IntGauge,
    pub deliveries_completed_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let dispatch_ops_total = IntCounterVec::new(
            Opts::new("dispatch_ops_total", "Dispatch operations by op and outcome"),
            &["op", "outcome"],
        )
        .expect("valid dispatch_ops_total metric");

        let auto_assign_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "auto_assign_latency_seconds",
                "Latency of auto-assignment in seconds",
            ),
            &["outcome"],
        )
        .expect("valid auto_assign_latency_seconds metric");

        let assignable_couriers = IntGauge::new(
            "assignable_couriers",
            "Size of the eligible courier pool at the last auto-assignment",
        )
        .expect("valid assignable_couriers metric");

        let deliveries_completed_total =
            IntCounter::new("deliveries_completed_total", "Total completed deliveries")
                .expect("valid deliveries_completed_total metric");

        registry
            .register(Box::new(dispatch_ops_total.clone()))
            .expect("register dispatch_ops_total");
        registry
            .register(Box::new(auto_assign_latency_seconds.clone()))
            .expect("register auto_assign_latency_seconds");
        registry
            .register(Box::new(assignable_couriers.clone()))
            .expect("register assignable_couriers");
        registry
            .register(Box::new(deliveries_completed_total.clone()))
            .expect("register deliveries_completed_total");

        Self {
            registry,
            dispatch_ops_total,
            auto_assign_latency_seconds,
            assignable_couriers,
            deliveries_completed_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
