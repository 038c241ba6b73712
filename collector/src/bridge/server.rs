use crate::scheduler::runner::{SharedControls, SharedDashboard};
use motioncore::prelude::{clamp_interval_secs, ThresholdConfig};
use serde::Deserialize;
use serde_json::json;
use std::{net::SocketAddr, thread};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9100))
}

/// Interval update accepted from the rendering layer.
#[derive(Debug, Deserialize)]
struct IntervalUpdate {
    poll_interval_seconds: u64,
}

/// Hosts the HTTP surface consumed by the rendering layer: the live series
/// snapshot plus the runtime threshold and interval controls.
pub struct Bridge {
    dashboard: SharedDashboard,
}

impl Bridge {
    pub fn new(dashboard: SharedDashboard, controls: SharedControls) -> Self {
        let dashboard_for_filter = dashboard.clone();
        let dashboard_filter = warp::any().map(move || dashboard_for_filter.clone());
        let controls_filter = warp::any().map(move || controls.clone());

        let series_route = warp::path("series")
            .and(warp::get())
            .and(dashboard_filter)
            .map(|state: SharedDashboard| warp::reply::json(&*state.read().unwrap()));

        let thresholds_route = warp::path("thresholds")
            .and(warp::post())
            .and(warp::body::json())
            .and(controls_filter.clone())
            .map(|update: ThresholdConfig, controls: SharedControls| {
                let update = update.clamped();
                controls.write().unwrap().thresholds = update.clone();
                warp::reply::with_status(
                    warp::reply::json(&json!({ "status": "ok", "thresholds": update })),
                    StatusCode::OK,
                )
            });

        let interval_route = warp::path("interval")
            .and(warp::post())
            .and(warp::body::json())
            .and(controls_filter)
            .map(|update: IntervalUpdate, controls: SharedControls| {
                let effective = clamp_interval_secs(update.poll_interval_seconds);
                controls.write().unwrap().interval_secs = effective;
                warp::reply::with_status(
                    warp::reply::json(
                        &json!({ "status": "ok", "poll_interval_seconds": effective }),
                    ),
                    StatusCode::OK,
                )
            });

        thread::spawn(move || {
            let routes = series_route.or(thresholds_route).or(interval_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address()).await;
            });
        });

        Self { dashboard }
    }

    pub fn publish_status(&self, message: &str) {
        let buffered = self.dashboard.read().unwrap().series.len();
        println!("[BRIDGE] {} ({} samples buffered)", message, buffered);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> crate::bridge::model::DashboardModel {
        self.dashboard.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::model::{CycleStatus, DashboardModel};
    use crate::scheduler::runner::Controls;
    use std::sync::{Arc, RwLock};

    #[test]
    fn bridge_snapshot_reflects_published_state() {
        let dashboard = Arc::new(RwLock::new(DashboardModel::default()));
        let controls = Arc::new(RwLock::new(Controls {
            thresholds: ThresholdConfig::default(),
            interval_secs: 5,
        }));
        let bridge = Bridge::new(dashboard.clone(), controls);
        assert_eq!(bridge.snapshot().status, CycleStatus::NoData);

        dashboard.write().unwrap().status = CycleStatus::FetchFailed;
        assert_eq!(bridge.snapshot().status, CycleStatus::FetchFailed);
        assert!(bridge.snapshot().series.is_empty());
    }
}
