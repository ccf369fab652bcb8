//! Transaction command handlers.

use crate::args::{ListTransactionArgs, TransactionFields};
use crate::commands::{plural, session, today, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{recent, Transaction, TransactionDraft};
use crate::store::Store;
use crate::{validate, Result};

fn draft(fields: TransactionFields) -> TransactionDraft {
    TransactionDraft {
        transaction_type: fields.transaction_type,
        amount: fields.amount,
        category: fields.category,
        description: fields.description,
        date: fields.date.unwrap_or_else(today),
    }
}

pub(super) fn line(t: &Transaction) -> String {
    let sign = if t.is_income() { "+" } else { "-" };
    format!(
        "{}  {sign}{}  {}  {}  [{}]",
        t.date,
        t.amount,
        t.category_info().label,
        t.description,
        t.id
    )
}

/// Validates and stores a new transaction. The date defaults to today.
///
/// # Errors
/// - `Validation` if the amount, description or category is not acceptable.
/// - `Session` if nobody is signed in.
pub async fn add_transaction(
    store: &mut dyn Store,
    fields: TransactionFields,
) -> Result<Out<Transaction>> {
    let user = session(store).await?;
    let draft = draft(fields);
    validate::transaction(&draft).pub_result(ErrorType::Validation)?;
    let created = store
        .create_transaction(&user.id, draft)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!("Added transaction {}", line(&created)),
        created,
    ))
}

/// Replaces all fields of the transaction `id`.
pub async fn update_transaction(
    store: &mut dyn Store,
    id: &str,
    fields: TransactionFields,
) -> Result<Out<Transaction>> {
    let user = session(store).await?;
    let draft = draft(fields);
    validate::transaction(&draft).pub_result(ErrorType::Validation)?;
    let updated = store
        .update_transaction(&user.id, id, draft)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!("Updated transaction {}", line(&updated)),
        updated,
    ))
}

pub async fn delete_transaction(store: &mut dyn Store, id: &str) -> Result<Out<()>> {
    let user = session(store).await?;
    store
        .delete_transaction(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(format!("Deleted transaction {id}").into())
}

/// Lists the user's transactions, newest first.
pub async fn list_transactions(
    store: &dyn Store,
    args: ListTransactionArgs,
) -> Result<Out<Vec<Transaction>>> {
    let user = session(store).await?;
    let all = store
        .transactions(&user.id)
        .await
        .pub_result(ErrorType::Store)?;
    let shown: Vec<Transaction> = recent(&all, args.limit.unwrap_or(all.len()))
        .into_iter()
        .cloned()
        .collect();

    let mut message = plural(shown.len(), "transaction", "transactions");
    for t in &shown {
        message.push_str("\n  ");
        message.push_str(&line(t));
    }
    Ok(Out::new(message, shown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn fields(amount: &str, category: &str) -> TransactionFields {
        TransactionFields {
            transaction_type: TransactionType::Expense,
            amount: Amount::from_str(amount).unwrap(),
            category: category.to_string(),
            description: "Bücher".to_string(),
            date: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let before = list_transactions(&store, ListTransactionArgs { limit: None })
            .await
            .unwrap()
            .structure()
            .unwrap()
            .len();

        let out = add_transaction(&mut store, fields("19.90", "education"))
            .await
            .unwrap();
        let created = out.structure().unwrap().clone();
        assert_eq!(created.date, today());
        assert!(out.message().contains("Bildung"));

        let list = list_transactions(&store, ListTransactionArgs { limit: None })
            .await
            .unwrap();
        assert_eq!(list.structure().unwrap().len(), before + 1);

        let limited = list_transactions(&store, ListTransactionArgs { limit: Some(1) })
            .await
            .unwrap();
        assert_eq!(limited.structure().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_wrong_category() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let err = add_transaction(&mut store, fields("5", "salary"))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_delete_missing_is_store_error() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let err = delete_transaction(&mut store, "nope").await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
    }

    #[tokio::test]
    async fn test_signed_out() {
        let env = TestEnv::signed_out().await;
        let mut store = env.store();
        let err = add_transaction(&mut store, fields("5", "food"))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Session);
    }
}
