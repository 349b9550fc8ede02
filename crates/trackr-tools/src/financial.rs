//! Built-in catalog for the personal-finance assistant.

use crate::{ParamSpec, ToolCatalog, ToolDeclaration, ToolError};

const TRANSACTION_TYPES: &[&str] = &["income", "expense"];
const CARD_STATUSES: &[&str] = &["active", "archived"];
const CARD_TYPES: &[&str] = &["debit", "credit"];

/// Returns the validated catalog offered to the chat model.
pub fn financial_catalog() -> Result<ToolCatalog, ToolError> {
    ToolCatalog::new(vec![
        ToolDeclaration::new("getTransactions", "Fetches users transactions from the database")
            .param(ParamSpec::one_of("type", TRANSACTION_TYPES).describe("Only return transactions of this type"))
            .param(ParamSpec::string("category").describe("Only return transactions in this category"))
            .param(ParamSpec::string("startDate").describe("Earliest transaction date, ISO 8601 (YYYY-MM-DD)"))
            .param(ParamSpec::string("endDate").describe("Latest transaction date, ISO 8601 (YYYY-MM-DD)"))
            .param(ParamSpec::integer("limit").describe("Maximum number of transactions to return")),
        ToolDeclaration::new("getUserDetails", "Fetches user's details"),
        ToolDeclaration::new("getBalance", "Fetches user's balance without currency"),
        ToolDeclaration::new("getCards", "Fetches the user's cards")
            .param(ParamSpec::one_of("status", CARD_STATUSES).describe("Only return cards with this status")),
        ToolDeclaration::new("createTransaction", "Records a new transaction for the user")
            .param(ParamSpec::string("title").describe("Short title of the transaction").required())
            .param(ParamSpec::number("amount").describe("Transaction amount, without currency").required())
            .param(ParamSpec::one_of("type", TRANSACTION_TYPES).describe("Whether money came in or went out").required())
            .param(ParamSpec::string("category").describe("Spending or income category").required())
            .param(ParamSpec::string("date").describe("Transaction date, ISO 8601 (YYYY-MM-DD)"))
            .param(ParamSpec::string("notes").describe("Free-form notes")),
        ToolDeclaration::new("updateTransaction", "Updates fields of an existing transaction")
            .param(ParamSpec::string("id").describe("Identifier of the transaction to update").required())
            .param(ParamSpec::string("title").describe("New title"))
            .param(ParamSpec::number("amount").describe("New amount, without currency"))
            .param(ParamSpec::one_of("type", TRANSACTION_TYPES).describe("New transaction type"))
            .param(ParamSpec::string("category").describe("New category"))
            .param(ParamSpec::string("date").describe("New date, ISO 8601 (YYYY-MM-DD)"))
            .param(ParamSpec::string("notes").describe("New notes")),
        ToolDeclaration::new("archiveCard", "Archives one of the user's cards")
            .param(ParamSpec::string("cardId").describe("Identifier of the card to archive").required()),
        ToolDeclaration::new("activateCard", "Re-activates an archived card")
            .param(ParamSpec::string("cardId").describe("Identifier of the card to activate").required()),
        ToolDeclaration::new("createCard", "Creates a new card for the user")
            .param(ParamSpec::string("name").describe("Display name of the card").required())
            .param(ParamSpec::one_of("type", CARD_TYPES).describe("Kind of card").required())
            .param(ParamSpec::number("balance").describe("Opening balance, without currency")),
    ])
}
