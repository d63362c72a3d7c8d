//! Canned responses used when no live chat provider is available
//!
//! Input is lowercased and checked against an ordered keyword table. The first
//! intent with a keyword occurring anywhere in the input wins, so
//! "multitasking" counts as a task request. Inputs matching nothing get a
//! capability overview that quotes the original message.

/// Intent category recognized by the fallback selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    HotLeads,
    DraftMessage,
    Tasks,
    Pipeline,
    PropertyMatch,
    General,
}

/// Keyword table in priority order
const INTENT_TABLE: &[(Intent, &[&str])] = &[
    (Intent::HotLeads, &["hot lead", "hot leads"]),
    (Intent::DraftMessage, &["draft", "message", "follow"]),
    (Intent::Tasks, &["task", "today", "schedule"]),
    (Intent::Pipeline, &["pipeline", "summary", "status"]),
    (Intent::PropertyMatch, &["property", "match", "recommend"]),
];

impl Intent {
    /// All intents, in the order they are tried
    pub const ALL: [Self; 6] = [
        Self::HotLeads,
        Self::DraftMessage,
        Self::Tasks,
        Self::Pipeline,
        Self::PropertyMatch,
        Self::General,
    ];

    /// Keywords that select this intent (empty for `General`)
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        INTENT_TABLE
            .iter()
            .find(|(intent, _)| *intent == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or_default()
    }

    /// Short human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HotLeads => "hot leads",
            Self::DraftMessage => "draft message",
            Self::Tasks => "tasks",
            Self::Pipeline => "pipeline summary",
            Self::PropertyMatch => "property match",
            Self::General => "general",
        }
    }

    /// Static template text
    ///
    /// For `General` this is only the capability list; [`respond`] prefixes it
    /// with a line quoting the user's message.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::HotLeads => HOT_LEADS,
            Self::DraftMessage => DRAFT_MESSAGE,
            Self::Tasks => TASKS,
            Self::Pipeline => PIPELINE,
            Self::PropertyMatch => PROPERTY_MATCH,
            Self::General => GENERAL,
        }
    }
}

/// Classify a message into the first matching intent
#[must_use]
pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();

    INTENT_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(Intent::General, |(intent, _)| *intent)
}

/// Produce the canned response for a message
#[must_use]
pub fn respond(message: &str) -> String {
    match classify(message) {
        Intent::General => format!("I understand you're asking about \"{message}\".\n\n{GENERAL}"),
        intent => intent.template().to_string(),
    }
}

const HOT_LEADS: &str = r"🔥 **Your Hot Leads:**

1. **Ahmed Hassan** - Villa in Emirates Hills ($2.4M)
   • Last contact: 3 hours ago
   • Status: Very interested, requesting second viewing

2. **Sarah Al-Maktoum** - Penthouse in Dubai Marina ($1.8M)
   • Viewing scheduled for tomorrow
   • Pre-qualified, ready to negotiate

3. **James Mitchell** - Palm Jumeirah Villa ($3.2M)
   • International buyer from UK
   • Flying in next week for viewing

Would you like me to draft a personalized follow-up for any of these leads?";

const DRAFT_MESSAGE: &str = r#"✉️ **Here's a personalized follow-up template:**

"Dear [Name],

I hope this message finds you well. It was wonderful speaking with you about the [Property Type] in [Location].

I wanted to share that I've identified a few exclusive listings that match your preferences perfectly. Given your interest in [specific feature], I believe these properties deserve your attention.

Would you be available for a private viewing this week? I can arrange a convenient time that suits your schedule.

Looking forward to helping you find your perfect home.

Warm regards,
Zee"

*Shall I customize this for a specific client?*"#;

const TASKS: &str = r"📋 **Today's Priority Tasks:**

✅ **Completed:**
- Morning market report review
- Responded to 3 inquiry emails

⏰ **Scheduled:**
- 2:00 PM - Viewing with Sarah Al-Maktoum (Marina Gate)
- 4:30 PM - Call with Ahmed Hassan (Second viewing)

📝 **Pending:**
- Send market update to 5 warm leads
- Prepare property comparison for James Mitchell
- Follow up with legal team on contract

Would you like me to help prioritize or reschedule any tasks?";

const PIPELINE: &str = r"📊 **Pipeline Summary:**

| Stage | Leads | Potential Value |
|-------|-------|-----------------|
| 🟢 New | 6 | $8.4M |
| 🟡 Qualified | 4 | $6.2M |
| 🟠 Viewing | 3 | $7.4M |
| 🔴 Negotiation | 2 | $5.0M |

**Total Pipeline:** $27M
**Your Projected Commission (2%):** $540,000

💡 *Focus on the negotiation stage - you're 2 deals away from a record month!*";

const PROPERTY_MATCH: &str = r"🏠 **Property Matches for Your Hot Leads:**

**For Ahmed Hassan (Budget: $2-3M, Villa)**
1. Emirates Hills - 6BR, Golf View - $2.4M ⭐
2. Al Barari - 5BR, Garden Villa - $2.8M
3. Jumeirah Golf Estates - 5BR, Modern - $2.2M

**For Sarah Al-Maktoum (Budget: $1.5-2M, Penthouse)**
1. Marina Gate - 3BR, Full Marina View - $1.8M ⭐
2. The Address, Downtown - 3BR, Burj View - $1.9M

Would you like me to prepare detailed comparison sheets?";

const GENERAL: &str = r"As your AI copilot, I can help you with:
• 🔥 **Lead Analysis** - Prioritize your hottest opportunities
• ✉️ **Message Drafting** - Personalized client communications
• 📊 **Pipeline Review** - Track your deals and projections
• 📋 **Task Management** - Stay on top of follow-ups
• 🏠 **Property Matching** - Find perfect fits for clients

How can I assist you today?";
