//! Prompt templates for the extraction oracle.
//!
//! One template per extraction kind, each an operator-tunable artifact: the
//! instruction text and the field schema it requests travel together, and a
//! deployment can swap either template without touching code paths.

/// Instruction for receipt-image extraction.
const RECEIPT_INSTRUCTION: &str = r#"Extract these fields from the receipt image:

Header:
- Merchant name
- Address
- Tax ID
- Contact

Customer:
- Name
- Address

Date:
- Transaction date

Line items (list each):
- Description
- Amount

Payment:
- Total
- VAT (if available, else null)
- Net total

Signature:
- Collector signed (true/false - check if there is any signature)

Return valid JSON only, no explanation, with exactly these keys:
merchant_name, merchant_address, tax_id, contact, customer_name,
customer_address, transaction_date, line_items (array of objects with
description and amount), total, vat, net_total, collector_signed.
Use null when a value is not present."#;

/// Instruction for Thai project-budget extraction. The page-bounded
/// document text is appended below the instruction.
const BUDGET_INSTRUCTION: &str = r#"The text below comes from a Thai academic project-proposal document.
Extract the project budget.

Return valid JSON only, no explanation, with exactly this shape:
{
  "project_name": string,
  "responsible_person": string,
  "budget_items": [
    {"activity_name": string, "description": string, "amount": number}
  ]
}

Rules:
- project_name comes from section "1. ชื่อโครงการ"
- responsible_person comes from section "2. ผู้รับผิดชอบ"
- budget_items come from section "14. รายละเอียดงบประมาณ"
- amount is a plain number in baht, no thousands separators
- Use null when a value is not present

Document:"#;

/// An instruction prompt the operator can tune per deployment.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    instruction: String,
}

impl PromptTemplate {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    /// Default template for the receipt-image pipeline.
    pub fn receipt() -> Self {
        Self::new(RECEIPT_INSTRUCTION)
    }

    /// Default template for the budget-PDF pipeline.
    pub fn budget() -> Self {
        Self::new(BUDGET_INSTRUCTION)
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Interpolate the page-bounded document text under the instruction.
    pub fn render_with_document(&self, document_text: &str) -> String {
        format!("{}\n\n{}", self.instruction, document_text)
    }
}
