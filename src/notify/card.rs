//! Adaptive Card payload for the rollout announcement
//!
//! Card layout drafted with https://adaptivecards.io/designer/

use crate::utils::text::fmt_percent;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const CARD_VERSION: &str = "1.2";
const DEFAULT_TITLE: &str = "Staged Rollout Updater";
const DEFAULT_ANNOUNCE_TIME: &str = "11:00";

/// One halt button on the card, linking to a console release page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HaltAction {
    pub title: String,
    pub url: String,
}

/// Inputs for the announcement card
#[derive(Debug, Clone)]
pub struct RolloutCard {
    pub current: f64,
    pub next: f64,
    pub title: Option<String>,
    pub announce_time: Option<String>,
    pub halt_actions: Vec<HaltAction>,
}

impl RolloutCard {
    pub fn new(current: f64, next: f64) -> Self {
        Self {
            current,
            next,
            title: None,
            announce_time: None,
            halt_actions: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_announce_time(mut self, announce_time: Option<String>) -> Self {
        self.announce_time = announce_time;
        self
    }

    pub fn with_halt_actions(mut self, halt_actions: Vec<HaltAction>) -> Self {
        self.halt_actions = halt_actions;
        self
    }

    /// Build the webhook payload: a `message` wrapping one adaptive card
    /// attachment
    pub fn build(&self) -> Value {
        let title = self.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let announce_time = self
            .announce_time
            .as_deref()
            .unwrap_or(DEFAULT_ANNOUNCE_TIME);

        let summary = format!(
            "The current staged release will automatically increase from {} to {} at {} today.",
            fmt_percent(self.current),
            fmt_percent(self.next),
            announce_time
        );

        let actions: Vec<Value> = self
            .halt_actions
            .iter()
            .map(|action| {
                json!({
                    "type": "Action.OpenUrl",
                    "title": action.title,
                    "url": action.url,
                    "style": "destructive"
                })
            })
            .collect();

        json!({
            "type": "message",
            "attachments": [
                {
                    "contentType": "application/vnd.microsoft.card.adaptive",
                    "content": {
                        "$schema": CARD_SCHEMA,
                        "type": "AdaptiveCard",
                        "version": CARD_VERSION,
                        "body": [
                            {
                                "type": "TextBlock",
                                "size": "Medium",
                                "weight": "Bolder",
                                "text": title
                            },
                            {
                                "type": "TextBlock",
                                "weight": "Bolder",
                                "text": "Google Play rollout update",
                                "wrap": true
                            },
                            {
                                "type": "TextBlock",
                                "text": summary,
                                "wrap": true
                            }
                        ],
                        "actions": actions
                    }
                }
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_wraps_adaptive_attachment() {
        let payload = RolloutCard::new(0.05, 0.2).build();

        assert_eq!(payload["type"], "message");
        let attachment = &payload["attachments"][0];
        assert_eq!(
            attachment["contentType"],
            "application/vnd.microsoft.card.adaptive"
        );
        assert_eq!(attachment["content"]["version"], CARD_VERSION);
        assert_eq!(attachment["content"]["$schema"], CARD_SCHEMA);
    }

    #[test]
    fn test_card_summary_text() {
        let payload = RolloutCard::new(0.05, 0.2).build();
        let body = &payload["attachments"][0]["content"]["body"];

        let summary = body[2]["text"].as_str().unwrap();
        assert!(summary.contains("from 5% to 20%"));
        assert!(summary.contains("at 11:00 today"));
    }

    #[test]
    fn test_card_custom_title_and_time() {
        let payload = RolloutCard::new(0.2, 0.5)
            .with_title(Some("Bitrise".to_string()))
            .with_announce_time(Some("09:30".to_string()))
            .build();
        let body = &payload["attachments"][0]["content"]["body"];

        assert_eq!(body[0]["text"], "Bitrise");
        assert!(
            body[2]["text"]
                .as_str()
                .unwrap()
                .contains("at 09:30 today")
        );
    }

    #[test]
    fn test_card_halt_actions() {
        let payload = RolloutCard::new(0.2, 0.5)
            .with_halt_actions(vec![
                HaltAction {
                    title: "Halt production rollout".to_string(),
                    url: "https://play.google.com/console/app/tracks/production".to_string(),
                },
                HaltAction {
                    title: "Halt beta rollout".to_string(),
                    url: "https://play.google.com/console/app/tracks/beta".to_string(),
                },
            ])
            .build();

        let actions = payload["attachments"][0]["content"]["actions"]
            .as_array()
            .unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0]["type"], "Action.OpenUrl");
        assert_eq!(actions[0]["title"], "Halt production rollout");
        assert_eq!(actions[1]["style"], "destructive");
    }

    #[test]
    fn test_card_without_actions_has_empty_list() {
        let payload = RolloutCard::new(0.0, 0.01).build();
        let actions = payload["attachments"][0]["content"]["actions"]
            .as_array()
            .unwrap();
        assert!(actions.is_empty());
    }
}
