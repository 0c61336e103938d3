use serde::{Deserialize, Serialize};

use crate::analysis::PatternKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedActivity {
    pub icon: String,
    pub text: String,
}

/// One of the three canned question/activity sets the emergency screen
/// renders. Picked by classification only; the renderer stays dumb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    pub title: String,
    pub subtitle: String,
    pub questions: Vec<String>,
    pub activities: Vec<SuggestedActivity>,
    pub accent: String,
}

fn activity(icon: &str, text: &str) -> SuggestedActivity {
    SuggestedActivity {
        icon: icon.to_string(),
        text: text.to_string(),
    }
}

pub fn recommendation_for(kind: PatternKind) -> RecommendationSet {
    match kind {
        PatternKind::Excessive => RecommendationSet {
            title: "Excessive Pattern Detected".to_string(),
            subtitle: "It looks like you are at a critical point".to_string(),
            questions: vec![
                "Shouldn't you take a nap?".to_string(),
                "How about going for a short walk?".to_string(),
                "Could you do something that doesn't involve screens?".to_string(),
            ],
            activities: vec![
                activity("moon", "Take a 20-30 minute nap"),
                activity("tree", "Go for a walk outside"),
                activity("coffee", "Make a warm drink"),
            ],
            accent: "orange".to_string(),
        },
        PatternKind::Obsessive => RecommendationSet {
            title: "Obsessive Pattern Detected".to_string(),
            subtitle: "There is a pattern in your behavior".to_string(),
            questions: vec![
                "What are you really avoiding?".to_string(),
                "Does this pattern repeat on certain days?".to_string(),
                "Is something specific making you anxious?".to_string(),
            ],
            activities: vec![
                activity("brain", "Reflect on the detected pattern"),
                activity("gamepad", "Switch to a completely different activity"),
                activity("coffee", "Take a mindful break"),
            ],
            accent: "purple".to_string(),
        },
        PatternKind::Normal => RecommendationSet {
            title: "Emergency Mode Activated".to_string(),
            subtitle: "Breathe deeply. You are here, in this moment.".to_string(),
            questions: vec![
                "What am I really trying to accomplish?".to_string(),
                "Does this activity move me toward my goals?".to_string(),
                "Can I define one specific task right now?".to_string(),
            ],
            activities: Vec::new(),
            accent: "blue".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_classification_gets_a_distinct_set() {
        let normal = recommendation_for(PatternKind::Normal);
        let excessive = recommendation_for(PatternKind::Excessive);
        let obsessive = recommendation_for(PatternKind::Obsessive);

        assert_ne!(normal.title, excessive.title);
        assert_ne!(excessive.title, obsessive.title);
        assert_eq!(normal.questions.len(), 3);
        assert_eq!(excessive.questions.len(), 3);
        assert_eq!(obsessive.questions.len(), 3);
    }

    #[test]
    fn normal_set_has_no_suggested_activities() {
        assert!(recommendation_for(PatternKind::Normal).activities.is_empty());
        assert_eq!(recommendation_for(PatternKind::Excessive).activities.len(), 3);
    }
}
