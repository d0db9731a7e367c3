//! Fire-and-forget notification seam.
//!
//! Delivery (email, push) happens out of process. The core only hands a
//! `Notification` to a `Notifier` after the transaction that produced it has
//! committed.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::entities::stages::StageType;
use crate::entities::team_members::TeamRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    TeamInvitation {
        membership_id: i64,
        team_id: i64,
        team_name: String,
        invitee_id: i64,
        role: TeamRole,
    },
    RegistrationClosed {
        active_team_ids: Vec<i64>,
    },
    StageActivated {
        stage_id: i64,
        stage_type: StageType,
        previous: StageType,
    },
}

pub trait Notifier: Send + Sync {
    fn dispatch(&self, notification: Notification);
}

/// Logs every notification as a structured event and drops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn dispatch(&self, notification: Notification) {
        match serde_json::to_string(&notification) {
            Ok(payload) => info!(%payload, "notification dispatched"),
            Err(e) => warn!(error = %e, ?notification, "notification could not be serialized"),
        }
    }
}

/// Hands notifications to a delivery worker over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!(notification = ?e.0, "notification worker has gone away; dropping");
        }
    }
}
