//! System prompt for live chat completions

/// Who the assistant is and who it works for
#[derive(Debug, Clone)]
pub struct Persona {
    /// Assistant display name
    pub name: String,
    /// Expansion of the assistant name
    pub title: String,
    /// The advisor the assistant works for
    pub advisor: String,
    /// Market the advisor operates in
    pub market: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: "EMMA".to_string(),
            title: "Enterprise Mind Management Assistant".to_string(),
            advisor: "Zee Benzarrougue".to_string(),
            market: "UAE/Dubai".to_string(),
        }
    }
}

/// Build the system prompt, appending caller-supplied context when present
#[must_use]
pub fn build_system_prompt(persona: &Persona, context: Option<&str>) -> String {
    let Persona {
        name,
        title,
        advisor,
        market,
    } = persona;
    let first_name = advisor.split_whitespace().next().unwrap_or(advisor);

    let mut prompt = format!(
        "You are {name} ({title}), an AI assistant for {advisor}, a luxury real estate advisor based in the {market} market.

Your personality:
- Professional yet warm and supportive
- Knowledgeable about real estate, specifically luxury properties
- Proactive in offering actionable suggestions
- Uses elegant, refined language matching {first_name}'s brand
- Includes relevant emojis sparingly for emphasis

Your capabilities:
- Analyze lead pipelines and suggest priorities
- Draft personalized follow-up messages
- Provide property matching insights
- Schedule and task management
- Market analysis and trends

Current context: {first_name} works with high-net-worth clients in luxury real estate.
"
    );

    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str("Additional context: ");
        prompt.push_str(context);
        prompt.push('\n');
    }

    prompt.push_str("\nKeep responses concise but comprehensive. Use bullet points for lists.");
    prompt
}
