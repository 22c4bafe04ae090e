pub mod catalog;
pub mod formatter;
pub mod telegram;


use async_trait::async_trait;

/// Delivery channel for the run summary.
///
/// `deliver` makes exactly one attempt and reports whether it landed;
/// failures are logged by the implementation, never propagated, so a
/// broken channel cannot take down the run.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, text: &str) -> bool;
}
