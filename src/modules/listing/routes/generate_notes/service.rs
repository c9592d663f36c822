use super::types::{request, response};
use crate::types::Context;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const INSTRUCTIONS: &str = "You write concise, high-converting rental listing notes for GetSuited (formalwear marketplace). Return ONLY plain text. No emojis. No bullets longer than a single line. Keep it 70-120 words.";

#[derive(Deserialize)]
struct ResponsesApiBody {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesApiBody {
    fn into_text(self) -> Option<String> {
        self.output_text
            .or_else(|| {
                self.output
                    .into_iter()
                    .flat_map(|item| item.content)
                    .find_map(|content| content.text)
            })
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn build_prompt(payload: &request::Payload) -> String {
    let price = payload
        .rental_price_per_day
        .map(|price| price.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Generate \"Full Suit Notes\" using ONLY the details below. Be confident and professional.\n\n\
        Suit Brand: {}\n\
        Suit Color: {}\n\
        Occasion: {}\n\
        Condition: {}\n\
        StandOut: {}\n\
        Alterations: {}\n\n\
        Fit details:\n\
        Jacket Fit: {}\n\
        Jacket Length: {}\n\
        Chest Size: {}\n\
        Pants Fit: {}\n\
        Waist: {}\n\
        Inseam: {}\n\n\
        Price: ${} per day\n\n\
        Write it like a polished marketplace listing note that boosts renter confidence.",
        or_na(&payload.suit_brand),
        or_na(&payload.suit_color),
        or_na(&payload.occasion),
        or_na(&payload.condition),
        or_na(&payload.stand_out),
        or_na(&payload.alterations),
        or_na(&payload.jacket_fit),
        or_na(&payload.jacket_length),
        or_na(&payload.chest_size),
        or_na(&payload.pants_fit),
        or_na(&payload.waist),
        or_na(&payload.inseam),
        price,
    )
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let res = reqwest::Client::new()
        .post(format!("{}/responses", ctx.openai.api_endpoint))
        .bearer_auth(&ctx.openai.api_key)
        .json(&json!({
            "model": ctx.openai.model,
            "instructions": INSTRUCTIONS,
            "input": build_prompt(&payload),
            "temperature": 0.7
        }))
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to reach model endpoint: {}", err);
            response::Error::GenerationFailed
        })?;

    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        tracing::error!("Note generation rejected: {} - {}", status, text);
        return Err(response::Error::GenerationFailed);
    }

    res.json::<ResponsesApiBody>()
        .await
        .map_err(|err| {
            tracing::error!("Failed to deserialize model response: {}", err);
            response::Error::GenerationFailed
        })?
        .into_text()
        .map(response::Success::Generated)
        .ok_or(response::Error::GenerationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_known_fields_and_na_for_missing() {
        let payload = request::Payload {
            suit_brand: Some("Hugo Boss".to_string()),
            rental_price_per_day: Some(35.0),
            ..Default::default()
        };

        let prompt = build_prompt(&payload);
        assert!(prompt.contains("Suit Brand: Hugo Boss"));
        assert!(prompt.contains("Price: $35 per day"));
        assert!(prompt.contains("Suit Color: N/A"));
    }

    #[test]
    fn response_text_falls_back_to_output_items() {
        let body: ResponsesApiBody = serde_json::from_value(serde_json::json!({
            "output": [{ "content": [{ "text": "  Sharp navy suit.  " }] }]
        }))
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("Sharp navy suit."));

        let empty: ResponsesApiBody =
            serde_json::from_value(serde_json::json!({ "output": [] })).unwrap();
        assert!(empty.into_text().is_none());
    }
}
