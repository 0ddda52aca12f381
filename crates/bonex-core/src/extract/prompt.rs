//! Engine instruction template for receipt extraction.

use chrono::NaiveDate;

use super::dates::RECEIPT_DATE_FORMAT;
use crate::models::receipt::Category;

/// Build the fixed instruction sent to the engine with each receipt.
///
/// The instruction pins the JSON shape, the category set, and the date
/// format. It also asks the engine to substitute the current date when
/// the receipt shows none, which keeps missing dates away from the
/// strict normalizer while leaving genuinely bad dates observable.
pub fn build_instruction(language: &str, today: NaiveDate) -> String {
    let categories = Category::ALL.map(|c| c.as_str()).join(", ");

    format!(
        "Analyze this receipt text in {language} and extract the following information.\n\
Return ONLY a valid JSON object with this exact structure:\n\
{{\n\
\"store_name\": \"store name here\",\n\
\"total_amount\": numeric_total,\n\
\"date\": \"date in DD-MM-YYYY format\",\n\
\"category\": \"overall category here\",\n\
\"products\": [\n\
{{\"name\": \"product name\", \"price\": numeric_price, \"category\": \"product category here\"}}\n\
]\n\
}}\n\
\n\
Every category value must be one of: {categories}.\n\
Prices and the total amount are numbers with two decimal places.\n\
If the receipt shows no date, use {today} instead.",
        today = today.format(RECEIPT_DATE_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_pins_shape_and_format() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 9).unwrap();
        let instruction = build_instruction("Bulgarian", today);

        assert!(instruction.contains("receipt text in Bulgarian"));
        assert!(instruction.contains("ONLY a valid JSON object"));
        assert!(instruction.contains("\"store_name\""));
        assert!(instruction.contains("\"products\""));
        assert!(instruction.contains("DD-MM-YYYY"));
    }

    #[test]
    fn test_instruction_lists_every_category() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let instruction = build_instruction("Bulgarian", today);

        for category in Category::ALL {
            assert!(
                instruction.contains(category.as_str()),
                "missing category {category}"
            );
        }
    }

    #[test]
    fn test_instruction_embeds_today_for_missing_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 9).unwrap();
        let instruction = build_instruction("Bulgarian", today);

        assert!(instruction.contains("use 09-08-2025 instead"));
    }
}
