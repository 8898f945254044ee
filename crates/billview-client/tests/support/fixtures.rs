use std::cell::RefCell;
use std::collections::HashMap;

use billview_client::fetch::{PageRequest, PageSource};
use billview_client::{ClientError, ClientResult};
use serde_json::{Value, json};

/// Serves canned pages and remembers every request it saw.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pages: HashMap<u32, Result<Vec<Value>, String>>,
    calls: RefCell<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, rows: Vec<Value>) -> Self {
        self.pages.insert(page, Ok(rows));
        self
    }

    pub fn with_failure(mut self, page: u32, detail: &str) -> Self {
        self.pages.insert(page, Err(detail.to_string()));
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls.borrow().iter().map(|request| request.page).collect()
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.calls.borrow().clone()
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(&self, request: &PageRequest) -> ClientResult<Vec<Value>> {
        self.calls.borrow_mut().push(*request);
        match self.pages.get(&request.page) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(detail)) => Err(ClientError::fetch_failed(request.page, detail)),
            None => Ok(Vec::new()),
        }
    }

    fn describe(&self) -> String {
        "scripted-source".to_string()
    }
}

pub fn billing_row(
    client_id: &str,
    client_name: &str,
    movement_type: &str,
    month: &str,
    slot: &str,
    amount: f64,
) -> Value {
    json!({
        "DOCUMENTO_CLIENTE": client_id,
        "NOME_CLIENTE": client_name,
        "TIPO_MOVIMENTO": movement_type,
        "ANO REFERENCIA": "2024",
        "MÊS REFERENCIA": month,
        "DIAS EM ATRASO": "A VENCER",
        "CONTAGEM TOTAL DIAS EM ATRASOS": 0,
        "VALOR_FINAL": amount,
        "DATA_EVENTO": "2024-03-01",
        "FATURA": slot,
    })
}

/// `count` retained rows, one client each, numbered from `start`.
pub fn numbered_rows(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|index| {
            billing_row(
                &format!("{index:05}"),
                &format!("Client {index}"),
                "FATURAMENTO",
                "03",
                "0",
                10.0,
            )
        })
        .collect()
}
