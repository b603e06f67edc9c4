//! Runs a page's `Fetch` against the data service.

use futures::try_join;

use super::{DashboardData, Fetch, Loaded, ServerDetailsData};
use crate::api::DataService;

/// Server whose CPU series backs the dashboard chart.
pub const DASHBOARD_SERVER: &str = "srv_1";

/// Multi-call fetches are issued together and fail as a whole if any call fails.
pub async fn run_fetch<S: DataService>(svc: &S, fetch: Fetch) -> Loaded {
    match fetch {
        Fetch::Dashboard => {
            let res = try_join!(
                svc.get_dashboard_stats(),
                svc.get_metrics(DASHBOARD_SERVER),
                svc.get_anomalies(None)
            )
            .map(|(stats, metrics, anomalies)| DashboardData {
                stats,
                metrics,
                anomalies,
            });
            Loaded::Dashboard(res)
        }
        Fetch::Servers => Loaded::Servers(svc.get_servers().await),
        Fetch::ServerDetails(id) => {
            let res = try_join!(
                svc.get_server_by_id(&id),
                svc.get_metrics(&id),
                svc.get_anomalies(Some(&id))
            )
            .map(|(server, metrics, anomalies)| ServerDetailsData {
                server,
                metrics,
                anomalies,
            });
            Loaded::ServerDetails(id, res)
        }
        Fetch::Anomalies => Loaded::Anomalies(svc.get_anomalies(None).await),
        Fetch::PredictionServers => Loaded::PredictionServers(svc.get_servers().await),
        Fetch::Prediction(id) => Loaded::Prediction(svc.get_predictions(&id).await),
        Fetch::AddServer(new) => Loaded::ServerAdded(
            svc.add_server(&new.name, &new.ip, new.api_key.as_deref())
                .await,
        ),
        Fetch::DeleteServer(id) => {
            let res = svc.delete_server(&id).await;
            Loaded::ServerDeleted(id, res)
        }
    }
}
