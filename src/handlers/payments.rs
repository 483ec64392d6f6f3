use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::{render, render_error};
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::{Member, PaymentInput, Transaction};

#[derive(Template)]
#[template(path = "payments/list.html")]
struct PaymentsListTemplate {
    transactions: Vec<Transaction>,
    members: Vec<Member>,
    form: PaymentInput,
    error: String,
}

#[derive(Template)]
#[template(path = "payments/receipt.html")]
struct ReceiptTemplate {
    transaction: Transaction,
}

async fn list_page(center: &FitnessCenter, form: PaymentInput, error: String) -> Result<PaymentsListTemplate> {
    Ok(PaymentsListTemplate {
        transactions: center.list_transactions().await?,
        members: center.list_members().await?,
        form,
        error,
    })
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    let page = list_page(&center, PaymentInput::default(), String::new()).await?;
    render(&page)
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<PaymentInput>,
) -> Result<Response> {
    match center.process_payment(&form).await {
        Ok(transaction) => {
            Ok(Redirect::to(&format!("/payments/{}", transaction.id)).into_response())
        }
        Err(e) if e.is_user_facing() => {
            let page = list_page(&center, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn receipt(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    let transaction = center.find_transaction(&id).await?;
    render(&ReceiptTemplate { transaction })
}
