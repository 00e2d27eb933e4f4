/// Builds the event analysis prompt from a pre-formatted article digest.
pub fn event_analysis_prompt(event_query: &str, articles_digest: &str) -> String {
    format!(
        "Analyze the following news articles about \"{}\" and provide a comprehensive timeline and summary.

Articles:
{}

Provide a JSON response with the following structure:
{{
    \"timeline\": [
        {{\"date\": \"YYYY-MM-DD\", \"event\": \"Description of what happened on this date\"}}
    ],
    \"summary\": \"A comprehensive 2-3 paragraph summary of the entire event\",
    \"key_highlights\": [
        \"Key fact or milestone 1\"
    ],
    \"discrepancies\": [
        {{
            \"issue\": \"Clear description of the conflict (e.g., 'Launch delayed' vs 'Launch on time')\",
            \"sources\": [\"Source 1\", \"Source 2\"],
            \"details\": \"What Source 1 says vs what Source 2 says\"
        }}
    ],
    \"verified_facts\": [
        \"Fact that appears consistently across sources\"
    ]
}}

Instructions:
- Order timeline events chronologically by date.
- Extract actual dates from the articles, do not invent dates.
- Identify major turning points and milestones.
- Actively compare the articles side-by-side for conflicting information: different
  dates for the same event, conflicting numbers or statistics, opposing statements
  about outcomes. If no significant conflicts exist, return an empty discrepancies array.
- Focus verified_facts on facts that appear in multiple sources.

Respond with valid JSON only. Do not tell me what you're doing.",
        event_query, articles_digest
    )
}

/// Builds the named-entity extraction prompt for a single article.
pub fn entity_extraction_prompt(article_text: &str) -> String {
    format!(
        "Extract the named entities from the following news text.

Text:
{}

Provide a JSON response with the following structure:
{{
    \"entities\": [
        {{\"name\": \"Entity name exactly as it appears\", \"type\": \"PERSON|ORGANIZATION|LOCATION|EVENT|DATE|OTHER\"}}
    ]
}}

Only include entities that actually appear in the text. Respond with valid JSON only.",
        article_text
    )
}
