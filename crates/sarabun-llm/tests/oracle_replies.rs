//! Oracle-boundary tests with a scripted oracle.
//!
//! Exercises the contract the pipelines rely on: fenced and unfenced JSON
//! replies parse into records, and an unusable reply is a content failure
//! that never panics.

use async_trait::async_trait;
use sarabun_llm::{
    parse_oracle_json, BudgetExtraction, ExtractionOracle, OracleError, OracleRequest,
    PromptTemplate, ReceiptExtraction,
};

/// Replays a canned reply regardless of the request.
struct ScriptedOracle {
    reply: &'static str,
}

#[async_trait]
impl ExtractionOracle for ScriptedOracle {
    async fn complete(&self, _request: OracleRequest) -> Result<String, OracleError> {
        Ok(self.reply.to_string())
    }
}

/// Always fails at the transport layer.
struct UnreachableOracle;

#[async_trait]
impl ExtractionOracle for UnreachableOracle {
    async fn complete(&self, _request: OracleRequest) -> Result<String, OracleError> {
        Err(OracleError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn fenced_budget_reply_parses_into_record() {
    let oracle = ScriptedOracle {
        reply: r#"```json
{
  "project_name": "โครงการอบรมเชิงปฏิบัติการ",
  "responsible_person": "นายสมชาย รักเรียน",
  "budget_items": [
    {"activity_name": "อบรม", "description": "ค่าวิทยากร", "amount": 3600}
  ]
}
```"#,
    };

    let prompt = PromptTemplate::budget().render_with_document("--- Page 14 ---\n...");
    let reply = oracle.complete(OracleRequest::text(prompt)).await.unwrap();
    let extraction: BudgetExtraction = parse_oracle_json(&reply).unwrap();

    assert_eq!(
        extraction.project_name.as_deref(),
        Some("โครงการอบรมเชิงปฏิบัติการ")
    );
    assert_eq!(extraction.budget_items.len(), 1);
}

#[tokio::test]
async fn unfenced_receipt_reply_parses_into_record() {
    let oracle = ScriptedOracle {
        reply: r#"{
            "merchant_name": "ร้านเครื่องเขียนดีดี",
            "transaction_date": "2024-11-05",
            "line_items": [{"description": "กระดาษ A4", "amount": 120.0}],
            "total": 120.0,
            "vat": null,
            "net_total": 120.0,
            "collector_signed": true
        }"#,
    };

    let reply = oracle
        .complete(OracleRequest::text(
            PromptTemplate::receipt().instruction().to_string(),
        ))
        .await
        .unwrap();
    let extraction: ReceiptExtraction = parse_oracle_json(&reply).unwrap();

    assert_eq!(extraction.merchant_name.as_deref(), Some("ร้านเครื่องเขียนดีดี"));
    assert_eq!(extraction.collector_signed, Some(true));
    assert!(extraction.vat.is_none());
}

#[tokio::test]
async fn prose_reply_is_a_content_failure_not_a_panic() {
    let oracle = ScriptedOracle {
        reply: "I'm sorry, the image is too blurry to read.",
    };

    let reply = oracle
        .complete(OracleRequest::text("extract".to_string()))
        .await
        .unwrap();
    let result: Result<ReceiptExtraction, _> = parse_oracle_json(&reply);

    assert!(matches!(result, Err(OracleError::Content(_))));
}

#[tokio::test]
async fn transport_and_content_failures_are_distinct() {
    let transport_err = UnreachableOracle
        .complete(OracleRequest::text("extract".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(transport_err, OracleError::Transport(_)));

    let content_err: OracleError =
        parse_oracle_json::<BudgetExtraction>("not json").unwrap_err();
    assert!(matches!(content_err, OracleError::Content(_)));
}
