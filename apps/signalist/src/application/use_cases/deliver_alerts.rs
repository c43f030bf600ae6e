//! Hourly Alert Delivery Use Case
//!
//! 1. Group all alerts by owner and resolve each owner's account
//! 2. Fetch quote snapshots for each owner's symbols
//! 3. Email every owner with at least one snapshot, concurrently
//! 4. Stamp `last_sent_at` for owners whose email went out

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    AlertRepository, MailerPort, MarketDataPort, OutgoingEmail, UserDirectoryPort,
};
use crate::application::templates::{alert_date_label, alert_email, alert_table};
use crate::domain::{Alert, StockSnapshot, Symbol, UserAccount, UserId};

use super::snapshots::SnapshotReader;

/// Summary of one delivery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDeliveryReport {
    /// False only when there was nothing to deliver.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Users with alerts and a known account.
    pub users: usize,
    /// Emails delivered.
    pub emails_sent: usize,
    /// Emails that the mailer rejected.
    pub emails_failed: usize,
    /// Users skipped for lack of snapshot data.
    pub skipped: usize,
    /// Alerts stamped as sent.
    pub alerts_marked: usize,
}

impl AlertDeliveryReport {
    fn no_alerts() -> Self {
        Self {
            success: false,
            message: "No alerts found".to_string(),
            users: 0,
            emails_sent: 0,
            emails_failed: 0,
            skipped: 0,
            alerts_marked: 0,
        }
    }
}

/// A user's alerts joined with their account.
struct AlertGroup {
    user: UserAccount,
    symbols: Vec<Symbol>,
}

enum Delivery {
    Sent,
    NoData,
    Failed,
}

/// Use case for sending hourly alert emails.
pub struct AlertDeliveryUseCase<A, U, M, Ml>
where
    A: AlertRepository,
    U: UserDirectoryPort,
    M: MarketDataPort,
    Ml: MailerPort,
{
    alert_repo: Arc<A>,
    users: Arc<U>,
    snapshots: Arc<SnapshotReader<M>>,
    mailer: Arc<Ml>,
}

impl<A, U, M, Ml> AlertDeliveryUseCase<A, U, M, Ml>
where
    A: AlertRepository,
    U: UserDirectoryPort,
    M: MarketDataPort,
    Ml: MailerPort,
{
    /// Create a new AlertDeliveryUseCase.
    pub const fn new(
        alert_repo: Arc<A>,
        users: Arc<U>,
        snapshots: Arc<SnapshotReader<M>>,
        mailer: Arc<Ml>,
    ) -> Self {
        Self {
            alert_repo,
            users,
            snapshots,
            mailer,
        }
    }

    /// Execute one delivery run.
    pub async fn execute(&self) -> AlertDeliveryReport {
        let groups = self.alert_groups().await;
        if groups.is_empty() {
            tracing::info!("No alerts to deliver");
            return AlertDeliveryReport::no_alerts();
        }

        // Snapshot groups one after another; each call batches internally.
        let mut prepared = Vec::with_capacity(groups.len());
        for group in groups {
            let snapshots = self.snapshots.snapshots(&group.symbols).await;
            prepared.push((group, snapshots));
        }

        let now = Utc::now();
        let date_label = alert_date_label(now);

        let deliveries = join_all(
            prepared
                .iter()
                .map(|(group, snapshots)| self.deliver(&group.user, snapshots, &date_label)),
        )
        .await;

        let mut report = AlertDeliveryReport {
            success: true,
            message: "Hourly stock alerts sent".to_string(),
            users: prepared.len(),
            emails_sent: 0,
            emails_failed: 0,
            skipped: 0,
            alerts_marked: 0,
        };

        for ((group, _), delivery) in prepared.iter().zip(deliveries) {
            match delivery {
                Delivery::Sent => {
                    report.emails_sent += 1;
                    report.alerts_marked += self.mark_sent(group, now).await;
                }
                Delivery::NoData => report.skipped += 1,
                Delivery::Failed => report.emails_failed += 1,
            }
        }

        tracing::info!(
            users = report.users,
            emails_sent = report.emails_sent,
            emails_failed = report.emails_failed,
            skipped = report.skipped,
            "Hourly alert delivery finished"
        );

        report
    }

    async fn alert_groups(&self) -> Vec<AlertGroup> {
        let alerts = match self.alert_repo.list_all().await {
            Ok(alerts) => alerts,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load alerts");
                return Vec::new();
            }
        };

        let mut groups = Vec::new();
        for (user_id, symbols) in group_by_user(alerts) {
            match self.users.find_user(&user_id).await {
                Ok(Some(user)) => groups.push(AlertGroup { user, symbols }),
                Ok(None) => tracing::warn!(user_id = %user_id, "No account for alert owner"),
                Err(e) => tracing::error!(user_id = %user_id, error = %e, "User lookup failed"),
            }
        }
        groups
    }

    async fn deliver(
        &self,
        user: &UserAccount,
        snapshots: &[StockSnapshot],
        date_label: &str,
    ) -> Delivery {
        if snapshots.is_empty() {
            tracing::debug!(user_id = %user.id, "No snapshot data, skipping alert email");
            return Delivery::NoData;
        }

        let email = OutgoingEmail {
            to: user.email.clone(),
            subject: format!("Hourly Stock Alert - {date_label}"),
            text: "Your hourly stock alert from Signalist".to_string(),
            html: alert_email(&user.name, date_label, &alert_table(snapshots)),
        };

        match self.mailer.send(email).await {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to send alert email");
                Delivery::Failed
            }
        }
    }

    async fn mark_sent(&self, group: &AlertGroup, at: DateTime<Utc>) -> usize {
        match self.alert_repo.mark_sent(&group.user.id, &group.symbols, at).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(user_id = %group.user.id, error = %e, "Failed to mark alerts sent");
                0
            }
        }
    }
}

/// Group alert symbols by owner, keeping the order owners are first seen.
fn group_by_user(alerts: Vec<Alert>) -> Vec<(UserId, Vec<Symbol>)> {
    let mut index: HashMap<UserId, usize> = HashMap::new();
    let mut groups: Vec<(UserId, Vec<Symbol>)> = Vec::new();

    for alert in alerts {
        if let Some(&position) = index.get(&alert.user_id) {
            groups[position].1.push(alert.symbol);
        } else {
            index.insert(alert.user_id.clone(), groups.len());
            groups.push((alert.user_id, vec![alert.symbol]));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::use_cases::BatchSettings;
    use crate::application::use_cases::test_support::{MockMarketData, RecordingMailer};
    use crate::infrastructure::persistence::{InMemoryAlertRepository, InMemoryUserDirectory};

    struct Fixture {
        alerts: Arc<InMemoryAlertRepository>,
        mailer: Arc<RecordingMailer>,
        use_case: AlertDeliveryUseCase<
            InMemoryAlertRepository,
            InMemoryUserDirectory,
            MockMarketData,
            RecordingMailer,
        >,
    }

    fn account(id: &str) -> UserAccount {
        UserAccount {
            id: UserId::new(id),
            email: format!("{id}@example.com"),
            name: id.to_uppercase(),
        }
    }

    async fn fixture(
        alerts: &[(&str, &str)],
        accounts: &[&str],
        market_data: MockMarketData,
        mailer: RecordingMailer,
    ) -> Fixture {
        let repo = Arc::new(InMemoryAlertRepository::new());
        for (user, symbol) in alerts {
            repo.insert(Alert::new(UserId::new(*user), Symbol::new(symbol), "Company"))
                .await
                .unwrap();
        }
        let users = Arc::new(InMemoryUserDirectory::new(
            accounts.iter().map(|id| account(id)).collect(),
        ));
        let snapshots = Arc::new(SnapshotReader::new(
            Arc::new(market_data),
            BatchSettings::new(8, Duration::ZERO),
        ));
        let mailer = Arc::new(mailer);

        Fixture {
            use_case: AlertDeliveryUseCase::new(
                Arc::clone(&repo),
                users,
                snapshots,
                Arc::clone(&mailer),
            ),
            alerts: repo,
            mailer,
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let alerts = vec![
            Alert::new(UserId::new("b"), Symbol::new("AAPL"), "Apple"),
            Alert::new(UserId::new("a"), Symbol::new("MSFT"), "Microsoft"),
            Alert::new(UserId::new("b"), Symbol::new("TSLA"), "Tesla"),
        ];

        let groups = group_by_user(alerts);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, UserId::new("b"));
        assert_eq!(groups[0].1, vec![Symbol::new("AAPL"), Symbol::new("TSLA")]);
        assert_eq!(groups[1].0, UserId::new("a"));
    }

    #[tokio::test]
    async fn no_alerts_reports_failure() {
        let f = fixture(&[], &["a"], MockMarketData::new(), RecordingMailer::new()).await;

        let report = f.use_case.execute().await;

        assert!(!report.success);
        assert_eq!(report.message, "No alerts found");
        assert!(f.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn emails_each_user_their_snapshots() {
        let market_data = MockMarketData::new()
            .with_quote("AAPL", 190.0, 1.0)
            .with_quote("TSLA", 250.0, -2.0);
        let f = fixture(
            &[("alice", "AAPL"), ("bob", "TSLA"), ("alice", "TSLA")],
            &["alice", "bob"],
            market_data,
            RecordingMailer::new(),
        )
        .await;

        let report = f.use_case.execute().await;

        assert!(report.success);
        assert_eq!(report.emails_sent, 2);
        assert_eq!(report.alerts_marked, 3);

        let sent = f.mailer.sent();
        let alice = sent.iter().find(|e| e.to == "alice@example.com").unwrap();
        assert!(alice.subject.starts_with("Hourly Stock Alert - "));
        assert!(alice.html.contains(">AAPL</td>"));
        assert!(alice.html.contains(">TSLA</td>"));
        assert!(alice.html.contains("Hi ALICE"));
    }

    #[tokio::test]
    async fn users_without_snapshots_get_no_email() {
        let market_data = MockMarketData::new().with_quote("AAPL", 190.0, 1.0);
        let f = fixture(
            &[("alice", "AAPL"), ("bob", "NOPE")],
            &["alice", "bob"],
            market_data,
            RecordingMailer::new(),
        )
        .await;

        let report = f.use_case.execute().await;

        assert_eq!(report.emails_sent, 1);
        assert_eq!(report.skipped, 1);
        let bob = f.alerts.list_by_user(&UserId::new("bob")).await.unwrap();
        assert!(bob[0].last_sent_at.is_none());
    }

    #[tokio::test]
    async fn marks_only_successfully_emailed_users() {
        let market_data = MockMarketData::new().with_quote("AAPL", 190.0, 1.0);
        let f = fixture(
            &[("alice", "AAPL"), ("bob", "AAPL")],
            &["alice", "bob"],
            market_data,
            RecordingMailer::rejecting(&["bob@example.com"]),
        )
        .await;

        let report = f.use_case.execute().await;

        assert_eq!(report.emails_sent, 1);
        assert_eq!(report.emails_failed, 1);
        let alice = f.alerts.list_by_user(&UserId::new("alice")).await.unwrap();
        let bob = f.alerts.list_by_user(&UserId::new("bob")).await.unwrap();
        assert!(alice[0].last_sent_at.is_some());
        assert!(bob[0].last_sent_at.is_none());
    }

    #[tokio::test]
    async fn unknown_owners_are_dropped() {
        let market_data = MockMarketData::new().with_quote("AAPL", 190.0, 1.0);
        let f = fixture(
            &[("ghost", "AAPL")],
            &["alice"],
            market_data,
            RecordingMailer::new(),
        )
        .await;

        let report = f.use_case.execute().await;

        assert!(!report.success);
        assert_eq!(report.message, "No alerts found");
    }
}
