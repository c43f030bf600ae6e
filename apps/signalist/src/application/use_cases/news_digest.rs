//! Daily News Digest Use Case
//!
//! Emails every user a short selection of news for their watchlist, or
//! general market news when the watchlist yields nothing.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    MailerPort, MarketDataPort, OutgoingEmail, UserDirectoryPort, WatchlistRepository,
};
use crate::application::templates::{digest_date_label, news_digest_email};
use crate::domain::{Article, Symbol, UserAccount};

use super::select_news::NewsSelector;

/// Summary of one digest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDigestReport {
    /// False only when there were no users.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Users considered.
    pub users: usize,
    /// Emails delivered.
    pub emails_sent: usize,
    /// Emails that the mailer rejected.
    pub emails_failed: usize,
    /// Users with no articles.
    pub skipped: usize,
}

/// Use case for sending the daily news digest.
pub struct NewsDigestUseCase<U, W, M, Ml>
where
    U: UserDirectoryPort,
    W: WatchlistRepository,
    M: MarketDataPort,
    Ml: MailerPort,
{
    users: Arc<U>,
    watchlist_repo: Arc<W>,
    news: Arc<NewsSelector<M>>,
    mailer: Arc<Ml>,
    max_articles: usize,
}

impl<U, W, M, Ml> NewsDigestUseCase<U, W, M, Ml>
where
    U: UserDirectoryPort,
    W: WatchlistRepository,
    M: MarketDataPort,
    Ml: MailerPort,
{
    /// Create a new NewsDigestUseCase.
    pub const fn new(
        users: Arc<U>,
        watchlist_repo: Arc<W>,
        news: Arc<NewsSelector<M>>,
        mailer: Arc<Ml>,
        max_articles: usize,
    ) -> Self {
        Self {
            users,
            watchlist_repo,
            news,
            mailer,
            max_articles,
        }
    }

    /// Execute one digest run.
    pub async fn execute(&self) -> NewsDigestReport {
        let users: Vec<UserAccount> = match self.users.list_users().await {
            Ok(users) => users
                .into_iter()
                .filter(|user| !user.email.trim().is_empty())
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load users for news digest");
                Vec::new()
            }
        };

        if users.is_empty() {
            return NewsDigestReport {
                success: false,
                message: "No users found for news delivery".to_string(),
                users: 0,
                emails_sent: 0,
                emails_failed: 0,
                skipped: 0,
            };
        }

        // Selection runs per user in sequence to stay inside upstream limits.
        let mut per_user = Vec::with_capacity(users.len());
        for user in &users {
            let articles = self.articles_for(user).await;
            per_user.push((user, articles));
        }

        let date_label = digest_date_label(Utc::now());
        let outcomes = join_all(
            per_user
                .iter()
                .filter(|(_, articles)| !articles.is_empty())
                .map(|(user, articles)| self.send(user, articles, &date_label)),
        )
        .await;

        let emails_sent = outcomes.iter().filter(|sent| **sent).count();
        let report = NewsDigestReport {
            success: true,
            message: "Daily news summary emails sent successfully".to_string(),
            users: users.len(),
            emails_sent,
            emails_failed: outcomes.len() - emails_sent,
            skipped: users.len() - outcomes.len(),
        };

        tracing::info!(
            users = report.users,
            emails_sent = report.emails_sent,
            emails_failed = report.emails_failed,
            skipped = report.skipped,
            "Daily news digest finished"
        );

        report
    }

    async fn articles_for(&self, user: &UserAccount) -> Vec<Article> {
        let symbols: Vec<Symbol> = match self.watchlist_repo.list_by_user(&user.id).await {
            Ok(items) => items.into_iter().map(|item| item.symbol).collect(),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Watchlist unavailable for digest");
                Vec::new()
            }
        };

        match self.news.select(&symbols).await {
            Ok(mut articles) => {
                articles.truncate(self.max_articles);
                articles
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to prepare news");
                Vec::new()
            }
        }
    }

    async fn send(&self, user: &UserAccount, articles: &[Article], date_label: &str) -> bool {
        let email = OutgoingEmail {
            to: user.email.clone(),
            subject: format!("📈 Market News Summary Today - {date_label}"),
            text: "Today's market news summary from Signalist".to_string(),
            html: news_digest_email(date_label, articles),
        };

        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to send news digest");
                false
            }
        }
    }
}
