//! Intent-dependent copy.
//!
//! Every string that changes with the detected intent lives in the table
//! below. Other modules look copy up through [`IntentCopy::for_intent`].

use serde::Serialize;

use crate::domain::report::Intent;

/// Color family used for intent badges and banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Warning,
    Success,
    Info,
}

/// Context banner shown above the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub tone: Tone,
}

/// All intent-dependent copy for one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentCopy {
    pub badge: &'static str,
    pub banner: Banner,
    pub complaints_heading: &'static str,
    pub praises_heading: &'static str,
    pub recommendations_heading: &'static str,
    pub risk_heading: &'static str,
}

const NEGATIVE: IntentCopy = IntentCopy {
    badge: "Detected Intent: Negative",
    banner: Banner {
        icon: "⚠️",
        title: "Negative Intent Analysis",
        body: "🔍 This analysis focuses on customer complaints, issues, and areas needing \
               improvement. Recommendations below are prioritized to address these concerns.",
        tone: Tone::Warning,
    },
    complaints_heading: "Top Customer Complaints (Focus Area)",
    praises_heading: "Top Customer Praises",
    recommendations_heading: "Recommended Fixes & Improvements",
    risk_heading: "Critical Risk Areas (Focus)",
};

const POSITIVE: IntentCopy = IntentCopy {
    badge: "Detected Intent: Positive",
    banner: Banner {
        icon: "✨",
        title: "Positive Intent Analysis",
        body: "🌟 This analysis highlights what customers love and appreciate. Recommendations \
               focus on amplifying these strengths and leveraging them for marketing.",
        tone: Tone::Success,
    },
    complaints_heading: "Top Customer Complaints",
    praises_heading: "Top Customer Praises (Focus Area)",
    recommendations_heading: "Recommendations to Amplify Strengths",
    risk_heading: "Risk Areas to Address",
};

const OVERALL: IntentCopy = IntentCopy {
    badge: "Detected Intent: Overall",
    banner: Banner {
        icon: "ℹ️",
        title: "Overall Analysis",
        body: "📊 This balanced analysis covers both strengths and weaknesses to give you a \
               complete picture of customer sentiment.",
        tone: Tone::Info,
    },
    complaints_heading: "Top Customer Complaints",
    praises_heading: "Top Customer Praises",
    recommendations_heading: "Product Improvement Recommendations",
    risk_heading: "Risk Areas to Address",
};

impl IntentCopy {
    /// Copy for `intent`; a missing intent uses the overall copy.
    pub fn for_intent(intent: Option<Intent>) -> &'static IntentCopy {
        match intent {
            Some(Intent::Negative) => &NEGATIVE,
            Some(Intent::Positive) => &POSITIVE,
            Some(Intent::Overall) | None => &OVERALL,
        }
    }
}
