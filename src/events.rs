//! Cross-module T12 events and the in-process bridge that delivers them.
//!
//! Events travel as a JSON envelope `{ "type": "...", "payload": {...} }`.
//! Only `NPS_SUBMITTED` is understood here; anything else is carried through
//! as [`T12Event::Other`] and ignored by subscribers that don't care.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

use crate::error::{CerebroError, Result};
use crate::profile::EVOLUTION_INDEX_MAX;

pub const NPS_SUBMITTED: &str = "NPS_SUBMITTED";

pub const NPS_MIN: f64 = -100.0;
pub const NPS_MAX: f64 = 100.0;
/// Evolution index an NPS of -100 maps to; +100 maps to this plus 50.
pub const NPS_EVOLUTION_BASE: f64 = 400.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NpsMetrics {
    pub score: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NpsSubmittedPayload {
    pub nps_metrics: NpsMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub enum T12Event {
    NpsSubmitted(NpsSubmittedPayload),
    Other { event_type: String, payload: Value },
}

#[derive(Serialize, Deserialize, Debug)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    payload: Value,
}

impl T12Event {
    pub fn nps_submitted(score: f64) -> Self {
        T12Event::NpsSubmitted(NpsSubmittedPayload {
            nps_metrics: NpsMetrics { score },
        })
    }

    pub fn event_type(&self) -> &str {
        match self {
            T12Event::NpsSubmitted(_) => NPS_SUBMITTED,
            T12Event::Other { event_type, .. } => event_type,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let envelope: EventEnvelope = serde_json::from_str(raw)?;
        match envelope.event_type.as_str() {
            NPS_SUBMITTED => {
                let payload: NpsSubmittedPayload = serde_json::from_value(envelope.payload)
                    .map_err(|e| {
                        CerebroError::InvalidEvent(format!("{} payload: {}", NPS_SUBMITTED, e))
                    })?;
                Ok(T12Event::NpsSubmitted(payload))
            }
            _ => Ok(T12Event::Other {
                event_type: envelope.event_type,
                payload: envelope.payload,
            }),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let envelope = match self {
            T12Event::NpsSubmitted(payload) => EventEnvelope {
                event_type: NPS_SUBMITTED.to_string(),
                payload: serde_json::to_value(payload)?,
            },
            T12Event::Other {
                event_type,
                payload,
            } => EventEnvelope {
                event_type: event_type.clone(),
                payload: payload.clone(),
            },
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

/// Maps an NPS score in [-100, 100] onto a bonus in [0, 50].
///
/// Out-of-range scores are clamped into the NPS domain first.
pub fn evolution_bonus(score: f64) -> f64 {
    if !(NPS_MIN..=NPS_MAX).contains(&score) {
        warn!("NPS score {} outside [{}, {}], clamping", score, NPS_MIN, NPS_MAX);
    }
    ((score.clamp(NPS_MIN, NPS_MAX) + 100.0) / 4.0).round()
}

/// Evolution index that a submitted NPS score sets. `None` for NaN/infinite scores.
pub fn evolution_index_for_nps(score: f64) -> Option<f64> {
    if !score.is_finite() {
        warn!("Non-finite NPS score {}, ignoring", score);
        return None;
    }
    Some((evolution_bonus(score) + NPS_EVOLUTION_BASE).min(EVOLUTION_INDEX_MAX))
}

pub trait EventSubscriber {
    fn on_event(&mut self, event: &T12Event);
}

/// Cloneable handle used by event sources.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: Sender<T12Event>,
}

impl EventPublisher {
    pub fn publish(&self, event: T12Event) -> Result<()> {
        debug!("Publishing {}", event.event_type());
        self.sender
            .send(event)
            .map_err(|e| CerebroError::Other(format!("event bridge closed: {}", e)))
    }
}

/// Queue between event sources and the subscriber that consumes them.
///
/// Each published event is handed to exactly one `deliver_pending` call, so
/// a subscriber sees an event instance at most once.
pub struct EventBridge {
    module: String,
    sender: Sender<T12Event>,
    receiver: Receiver<T12Event>,
}

impl EventBridge {
    pub fn new(module: &str) -> Self {
        let (sender, receiver) = mpsc::channel();
        debug!("T12 bridge initialised for module '{}'", module);
        Self {
            module: module.to_string(),
            sender,
            receiver,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Drains every queued event into `subscriber`. Returns how many were delivered.
    pub fn deliver_pending(&self, subscriber: &mut dyn EventSubscriber) -> usize {
        let mut delivered = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    debug!("[{}] Delivering {}", self.module, event.event_type());
                    subscriber.on_event(&event);
                    delivered += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<T12Event>,
    }

    impl EventSubscriber for Recorder {
        fn on_event(&mut self, event: &T12Event) {
            self.seen.push(event.clone());
        }
    }

    #[test]
    fn test_bonus_mapping() {
        assert_eq!(evolution_bonus(100.0), 50.0);
        assert_eq!(evolution_bonus(-100.0), 0.0);
        assert_eq!(evolution_bonus(0.0), 25.0);
        // 2.5 rounds up
        assert_eq!(evolution_bonus(-90.0), 3.0);
        assert_eq!(evolution_bonus(250.0), 50.0);
    }

    #[test]
    fn test_index_for_nps() {
        assert_eq!(evolution_index_for_nps(100.0), Some(450.0));
        assert_eq!(evolution_index_for_nps(-100.0), Some(400.0));
        assert_eq!(evolution_index_for_nps(f64::NAN), None);
        assert_eq!(evolution_index_for_nps(f64::INFINITY), None);
    }

    #[test]
    fn test_parse_nps_event() {
        let event =
            T12Event::from_json(r#"{"type":"NPS_SUBMITTED","payload":{"npsMetrics":{"score":42}}}"#)
                .unwrap();
        assert_eq!(event, T12Event::nps_submitted(42.0));
        assert_eq!(event.event_type(), NPS_SUBMITTED);
    }

    #[test]
    fn test_parse_unknown_event() {
        let event = T12Event::from_json(r#"{"type":"TRACK_STARTED","payload":{"id":"x"}}"#).unwrap();
        assert_eq!(event.event_type(), "TRACK_STARTED");
        assert!(matches!(event, T12Event::Other { .. }));
    }

    #[test]
    fn test_parse_bad_nps_payload() {
        let err = T12Event::from_json(r#"{"type":"NPS_SUBMITTED","payload":{"score":1}}"#)
            .unwrap_err();
        assert!(matches!(err, CerebroError::InvalidEvent(_)));
    }

    #[test]
    fn test_envelope_json_shape() {
        let json = T12Event::nps_submitted(-20.0).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "NPS_SUBMITTED");
        assert_eq!(value["payload"]["npsMetrics"]["score"], -20.0);
    }

    #[test]
    fn test_bridge_delivers_once() {
        let bridge = EventBridge::new("cerebro");
        let publisher = bridge.publisher();
        publisher.publish(T12Event::nps_submitted(10.0)).unwrap();
        publisher.publish(T12Event::nps_submitted(20.0)).unwrap();

        let mut recorder = Recorder::default();
        assert_eq!(bridge.deliver_pending(&mut recorder), 2);
        assert_eq!(bridge.deliver_pending(&mut recorder), 0);
        assert_eq!(
            recorder.seen,
            vec![T12Event::nps_submitted(10.0), T12Event::nps_submitted(20.0)]
        );
    }
}
