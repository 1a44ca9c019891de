//! Integration tests for the handler chain: commands, inline buttons, and
//! dialogue flows, driven with synthetic core messages against an in-memory
//! SQLite database and a mock Bot that records what was sent.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use ledger_bot::{
    BaseConfig, Bot, BotConfig, Chat, Keyboard, LedgerBot, Message, MessageDirection, Result,
    User,
};

/// A message captured by [`MockBot`].
#[derive(Debug, Clone)]
struct Sent {
    chat_id: i64,
    text: String,
    keyboard: Option<Keyboard>,
}

/// Bot impl that collects sent messages instead of talking to Telegram.
#[derive(Default)]
struct MockBot {
    sent: Mutex<Vec<Sent>>,
}

impl MockBot {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn last(&self) -> Sent {
        self.sent.lock().unwrap().last().cloned().expect("no message sent")
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: None,
        });
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: Some(keyboard.clone()),
        });
        Ok(())
    }
}

fn test_config() -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "test-token".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
            database_url: "sqlite::memory:".to_string(),
            report_limit: 10,
            debtor_retention_days: 30,
            cleanup_interval_secs: 3600,
        },
    }
}

async fn test_bot(mock: Arc<MockBot>) -> LedgerBot {
    LedgerBot::new(test_config(), Some(mock as Arc<dyn Bot>))
        .await
        .expect("Failed to build bot")
}

const CHAT_ID: i64 = 42;

fn message(content: &str, message_type: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 7,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: CHAT_ID,
            chat_type: "Private".to_string(),
        },
        content: content.to_string(),
        message_type: message_type.to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

fn command(text: &str) -> Message {
    message(text, "command")
}

fn text(body: &str) -> Message {
    message(body, "text")
}

fn callback(data: &str) -> Message {
    message(data, "callback")
}

/// **Test: /start replies with the welcome text and the 4-row main menu.**
#[tokio::test]
async fn test_start_sends_main_menu() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/start")).await.unwrap();

    let sent = mock.last();
    assert_eq!(sent.chat_id, CHAT_ID);
    assert!(sent.text.contains("Welcome"));
    let keyboard = sent.keyboard.expect("main menu expected");
    assert_eq!(keyboard.rows.len(), 4);
}

/// **Test: /in records an income and confirms with the menu.**
#[tokio::test]
async fn test_in_command_records_income() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/in 100.5 salary"))
        .await
        .unwrap();

    let recent = bot.components.transactions.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].kind, "income");
    assert_eq!(recent[0].amount, 100.5);
    assert_eq!(recent[0].note, Some("salary".to_string()));

    let sent = mock.last();
    assert!(sent.text.contains("Income of 100.50 recorded"));
    assert!(sent.keyboard.is_some());
}

/// **Test: /out with a bad amount replies usage and records nothing.**
#[tokio::test]
async fn test_out_command_rejects_bad_amount() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/out abc")).await.unwrap();
    bot.handle_core_message(&command("/out -5")).await.unwrap();

    assert_eq!(bot.components.transactions.count().await.unwrap(), 0);
    for sent in mock.sent() {
        assert!(sent.text.contains("Usage: /out"));
    }
}

/// **Test: /report on an empty ledger replies the no-transactions hint.**
#[tokio::test]
async fn test_report_empty() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/report")).await.unwrap();

    assert_eq!(mock.last().text, "No transactions found.");
}

/// **Test: /report shows entries newest first plus totals.**
#[tokio::test]
async fn test_report_with_entries() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/in 100 salary")).await.unwrap();
    bot.handle_core_message(&command("/out 30 rent")).await.unwrap();
    bot.handle_core_message(&command("/report")).await.unwrap();

    let report = mock.last().text;
    assert!(report.contains("Income: 100.00"));
    assert!(report.contains("Expense: 30.00"));
    assert!(report.contains("Balance: 70.00"));
    assert!(report.contains("salary"));
    assert!(report.contains("rent"));
}

/// **Test: income button → amount → note records the transaction.**
///
/// The callback sets AwaitingAmount; the amount message asks for a note; the
/// note message inserts the row and re-sends the menu.
#[tokio::test]
async fn test_income_dialogue_flow() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&callback("income")).await.unwrap();
    assert!(mock.last().text.contains("income amount"));

    bot.handle_core_message(&text("50")).await.unwrap();
    assert!(mock.last().text.contains("description"));

    bot.handle_core_message(&text("found on street")).await.unwrap();
    assert!(mock.last().text.contains("Income of 50.00 recorded"));
    assert!(mock.last().keyboard.is_some());

    let recent = bot.components.transactions.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].note, Some("found on street".to_string()));
}

/// **Test: a bad amount keeps the dialogue alive for a retry; '-' skips the note.**
#[tokio::test]
async fn test_expense_dialogue_retry_and_skip_note() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&callback("expense")).await.unwrap();
    bot.handle_core_message(&text("-5")).await.unwrap();
    assert!(mock.last().text.contains("positive amount"));

    bot.handle_core_message(&text("5")).await.unwrap();
    bot.handle_core_message(&text("-")).await.unwrap();

    let recent = bot.components.transactions.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].kind, "expense");
    assert_eq!(recent[0].amount, 5.0);
    assert_eq!(recent[0].note, None);
}

/// **Test: edit button → pick transaction → new amount/note updates the row.**
#[tokio::test]
async fn test_edit_transaction_flow() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/out 20 coffee")).await.unwrap();
    let id = bot.components.transactions.recent(1).await.unwrap()[0].id;

    bot.handle_core_message(&callback("edit")).await.unwrap();
    let menu = mock.last().keyboard.expect("edit menu expected");
    assert_eq!(menu.rows[0][0].data, format!("edit_tx:{}", id));

    bot.handle_core_message(&callback(&format!("edit_tx:{}", id)))
        .await
        .unwrap();
    assert!(mock.last().text.contains("Editing"));

    bot.handle_core_message(&text("25 espresso")).await.unwrap();
    assert!(mock.last().text.contains("updated"));

    let record = bot.components.transactions.get(id).await.unwrap().unwrap();
    assert_eq!(record.amount, 25.0);
    assert_eq!(record.note, Some("espresso".to_string()));
}

/// **Test: edit menu on an empty ledger says there is nothing to edit.**
#[tokio::test]
async fn test_edit_menu_empty() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&callback("edit")).await.unwrap();
    assert_eq!(mock.last().text, "No transactions to edit.");
}

/// **Test: debtor lifecycle via commands and the mark-paid button.**
#[tokio::test]
async fn test_debtor_lifecycle() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/set_debtor alice smith 250"))
        .await
        .unwrap();
    assert!(mock.last().text.contains("alice smith owes 250.00"));
    let id = bot.components.debtors.list().await.unwrap()[0].id;

    bot.handle_core_message(&command("/debtor_list")).await.unwrap();
    let sent = mock.last();
    assert!(sent.text.contains("alice smith"));
    assert!(sent.text.contains("[owes]"));
    let keyboard = sent.keyboard.expect("mark-paid buttons expected");
    assert_eq!(keyboard.rows[0][0].data, format!("debtor_paid:{}", id));

    bot.handle_core_message(&callback(&format!("debtor_paid:{}", id)))
        .await
        .unwrap();
    assert!(mock.last().text.contains("marked as paid"));
    assert!(bot.components.debtors.get(id).await.unwrap().unwrap().paid);
}

/// **Test: /edit_debtor starts a dialogue and the next message updates the record.**
#[tokio::test]
async fn test_edit_debtor_flow() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/set_debtor bob 40")).await.unwrap();
    let id = bot.components.debtors.list().await.unwrap()[0].id;

    bot.handle_core_message(&command(&format!("/edit_debtor {}", id)))
        .await
        .unwrap();
    assert!(mock.last().text.contains("Send the new <name> <amount>"));

    bot.handle_core_message(&text("bob jones 45.5")).await.unwrap();
    assert!(mock.last().text.contains("updated"));

    let record = bot.components.debtors.get(id).await.unwrap().unwrap();
    assert_eq!(record.name, "bob jones");
    assert_eq!(record.amount, 45.5);
}

/// **Test: editing a missing debtor id replies not-found.**
#[tokio::test]
async fn test_edit_debtor_missing() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/edit_debtor 999")).await.unwrap();
    assert!(mock.last().text.contains("not found"));
}

/// **Test: clear commands wipe the right tables.**
#[tokio::test]
async fn test_clear_commands() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/in 10")).await.unwrap();
    bot.handle_core_message(&command("/set_debtor carol 5")).await.unwrap();

    bot.handle_core_message(&command("/clear_rep")).await.unwrap();
    assert_eq!(bot.components.transactions.count().await.unwrap(), 0);
    assert_eq!(bot.components.debtors.count().await.unwrap(), 1);

    bot.handle_core_message(&command("/clear_debtor_list")).await.unwrap();
    assert_eq!(bot.components.debtors.count().await.unwrap(), 0);

    bot.handle_core_message(&command("/in 10")).await.unwrap();
    bot.handle_core_message(&command("/set_debtor carol 5")).await.unwrap();
    bot.handle_core_message(&command("/clear_data")).await.unwrap();
    assert_eq!(bot.components.transactions.count().await.unwrap(), 0);
    assert_eq!(bot.components.debtors.count().await.unwrap(), 0);
}

/// **Test: /test replies with record counts.**
#[tokio::test]
async fn test_health_check() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/in 10")).await.unwrap();
    bot.handle_core_message(&command("/test")).await.unwrap();

    let sent = mock.last();
    assert!(sent.text.contains("OK"));
    assert!(sent.text.contains("1 transactions"));
}

/// **Test: unknown commands get a hint, not silence.**
#[tokio::test]
async fn test_unknown_command() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&command("/bogus")).await.unwrap();
    assert!(mock.last().text.contains("Unknown command"));
}

/// **Test: a fresh command abandons a pending dialogue.**
///
/// After the income button, /start arrives; the following plain text must
/// fall through instead of being read as an amount.
#[tokio::test]
async fn test_command_cancels_dialogue() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&callback("income")).await.unwrap();
    bot.handle_core_message(&command("/start")).await.unwrap();

    let sent_before = mock.sent().len();
    bot.handle_core_message(&text("50")).await.unwrap();

    assert_eq!(mock.sent().len(), sent_before);
    assert_eq!(bot.components.transactions.count().await.unwrap(), 0);
}

/// **Test: plain text with no pending dialogue is ignored.**
#[tokio::test]
async fn test_plain_text_without_state_falls_through() {
    let mock = MockBot::new();
    let bot = test_bot(mock.clone()).await;

    bot.handle_core_message(&text("hello there")).await.unwrap();
    assert!(mock.sent().is_empty());
}
