//! Tick driver — the periodic pulse source for a running service.
//!
//! Two modes share one loop. [`run`] delivers a full tick on every period,
//! optionally up to a budget. [`replay`] feeds recorded hand frames, one per
//! period, through the gesture classifier so only gestured actions advance.
//!
//! Pulses are strictly sequential: a late tick is skipped rather than
//! bunched up, so ticks never overlap and the host keeps control of pacing.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use axpulse_domain::gesture::HandLandmarks;

use crate::automation_engine::TickReport;
use crate::ports::HostPlatform;
use crate::services::automation_service::AutomationService;

/// Totals for one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveSummary {
    /// Pulses delivered, including skipped ones.
    pub pulses: u64,
    /// Pulses that arrived while the service was stopped.
    pub skipped: u64,
    /// Actions the host accepted.
    pub dispatched: u64,
}

/// Pulse `service` every `period` until `shutdown` resolves or `max_ticks`
/// pulses have been delivered.
pub async fn run<H, S>(
    service: &AutomationService<H>,
    period: Duration,
    max_ticks: Option<u64>,
    shutdown: S,
) -> DriveSummary
where
    H: HostPlatform,
    S: Future<Output = ()>,
{
    let budget = 0..max_ticks.unwrap_or(u64::MAX);
    drive(service, period, budget, shutdown, |service, _| service.tick()).await
}

/// Pulse `service` with one recorded hand frame every `period` until the
/// frames run out or `shutdown` resolves.
pub async fn replay<H, I, S>(
    service: &AutomationService<H>,
    period: Duration,
    hands: I,
    shutdown: S,
) -> DriveSummary
where
    H: HostPlatform,
    I: IntoIterator<Item = HandLandmarks>,
    S: Future<Output = ()>,
{
    drive(service, period, hands.into_iter(), shutdown, |service, hand| {
        service.pulse_hand(&hand)
    })
    .await
}

async fn drive<H, P, S>(
    service: &AutomationService<H>,
    period: Duration,
    mut pulses: impl Iterator<Item = P>,
    shutdown: S,
    apply: impl Fn(&AutomationService<H>, P) -> TickReport,
) -> DriveSummary
where
    H: HostPlatform,
    S: Future<Output = ()>,
{
    let mut summary = DriveSummary::default();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        let Some(pulse) = pulses.next() else {
            tracing::debug!(pulses = summary.pulses, "pulse source exhausted");
            break;
        };

        tokio::select! {
            () = &mut shutdown => {
                tracing::info!("shutdown requested, tick driver exiting");
                break;
            }
            _ = interval.tick() => {
                let report = apply(service, pulse);
                summary.pulses += 1;
                if report.is_skipped() {
                    summary.skipped += 1;
                }
                summary.dispatched += report.dispatched().count() as u64;
            }
        }
    }

    summary
}
