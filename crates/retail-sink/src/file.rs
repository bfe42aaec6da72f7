//! File sink: one append-only file per document kind per run.
//!
//! Each document is written pretty-printed and followed by `",\n"`, so a file
//! is a pseudo-array: wrap it in brackets and drop the final separator to get
//! valid JSON.

use crate::document::{Document, DocumentKind};
use crate::error::SinkError;
use crate::traits::DocumentSink;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Separator written after every document.
pub const RECORD_SEPARATOR: &[u8] = b",\n";

struct RunFile {
    path: PathBuf,
    file: File,
    written: u64,
}

impl RunFile {
    fn open(path: PathBuf) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file,
            written: 0,
        })
    }

    fn append(&mut self, rendered: &str) -> Result<(), SinkError> {
        let mut buffer = Vec::with_capacity(rendered.len() + RECORD_SEPARATOR.len());
        buffer.extend_from_slice(rendered.as_bytes());
        buffer.extend_from_slice(RECORD_SEPARATOR);
        // One write per document keeps a record whole in the file.
        self.file.write_all(&buffer)?;
        self.written += 1;
        Ok(())
    }
}

/// Appends baskets to `<run_id>_basket.json` and payments to
/// `<run_id>_pmnt.json` inside the output directory.
pub struct FileSink {
    run_id: String,
    basket: RunFile,
    payment: RunFile,
}

impl FileSink {
    /// Create (or reopen for append) the run files under `output_dir`.
    ///
    /// The directory is created if it does not exist.
    pub fn create<P: AsRef<Path>>(output_dir: P, run_id: &str) -> Result<Self, SinkError> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let basket = RunFile::open(output_dir.join(format!("{run_id}_basket.json")))?;
        let payment = RunFile::open(output_dir.join(format!("{run_id}_pmnt.json")))?;

        info!(
            "Writing baskets to {} and payments to {}",
            basket.path.display(),
            payment.path.display()
        );

        Ok(Self {
            run_id: run_id.to_string(),
            basket,
            payment,
        })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn basket_path(&self) -> &Path {
        &self.basket.path
    }

    pub fn payment_path(&self) -> &Path {
        &self.payment.path
    }

    /// Number of documents written so far, baskets then payments.
    pub fn written(&self) -> (u64, u64) {
        (self.basket.written, self.payment.written)
    }
}

#[async_trait::async_trait]
impl DocumentSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn accept(&mut self, document: Document<'_>) -> Result<(), SinkError> {
        let rendered = document.to_pretty_json()?;
        let target = match document.kind() {
            DocumentKind::Basket => &mut self.basket,
            DocumentKind::Payment => &mut self.payment,
        };
        target.append(&rendered)?;
        debug!(
            "Wrote {} {} to {}",
            document.kind(),
            document.invoice_number(),
            target.path.display()
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        self.basket.file.sync_all()?;
        self.payment.file.sync_all()?;
        info!(
            "Closed run files: {} baskets, {} payments",
            self.basket.written, self.payment.written
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_types::{Basket, BasketItem, Clerk, Payment, Store};

    fn basket(invoice: &str) -> Basket {
        Basket {
            invoice_number: invoice.to_string(),
            sale_timestamp: "2023-12-05T10:00:00+02:00".to_string(),
            store: Store::new("1", "A"),
            clerk: Clerk::new("1", "C1"),
            terminal_point: 3,
            items: vec![BasketItem {
                product_id: "p1".to_string(),
                name: "Bread".to_string(),
                brand: "Albany".to_string(),
                category: "Bakery".to_string(),
                unit_price: 10.0,
                quantity: 1,
            }],
            nett: 10.0,
            vat: 1.5,
            total: 11.5,
        }
    }

    fn payment(invoice: &str) -> Payment {
        Payment {
            invoice_number: invoice.to_string(),
            pay_timestamp: "2024-01-05T10:00:00+02:00".to_string(),
            paid_amount: 11.5,
            financial_transaction_id: format!("fin-{invoice}"),
        }
    }

    /// Wrap a pseudo-array file into a proper JSON array.
    fn read_pseudo_array(path: &Path) -> Vec<serde_json::Value> {
        let content = std::fs::read_to_string(path).unwrap();
        let trimmed = content.trim_end().trim_end_matches(',');
        serde_json::from_str(&format!("[{trimmed}]")).unwrap()
    }

    #[tokio::test]
    async fn test_file_sink_routes_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::create(dir.path(), "run-1").unwrap();

        let (b1, b2) = (basket("inv-1"), basket("inv-2"));
        let p1 = payment("inv-1");
        sink.accept(Document::from(&b1)).await.unwrap();
        sink.accept(Document::from(&p1)).await.unwrap();
        sink.accept(Document::from(&b2)).await.unwrap();
        sink.close().await.unwrap();

        assert_eq!(sink.written(), (2, 1));
        assert_eq!(sink.basket_path(), dir.path().join("run-1_basket.json"));
        assert_eq!(sink.payment_path(), dir.path().join("run-1_pmnt.json"));

        let baskets = read_pseudo_array(sink.basket_path());
        assert_eq!(baskets.len(), 2);
        assert_eq!(baskets[0]["invoiceNumber"], "inv-1");
        assert_eq!(baskets[1]["invoiceNumber"], "inv-2");

        let payments = read_pseudo_array(sink.payment_path());
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["paidAmount"], 11.5);
    }

    #[tokio::test]
    async fn test_every_record_ends_with_separator() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::create(dir.path(), "run-2").unwrap();

        let b = basket("inv-1");
        sink.accept(Document::from(&b)).await.unwrap();

        let content = std::fs::read_to_string(sink.basket_path()).unwrap();
        assert!(content.starts_with("{\n"));
        assert!(content.ends_with("},\n"));
    }

    #[tokio::test]
    async fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("today");

        let sink = FileSink::create(&nested, "run-3").unwrap();
        assert!(sink.basket_path().exists());
        assert!(sink.payment_path().exists());
        assert_eq!(sink.run_id(), "run-3");
    }

    #[tokio::test]
    async fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let b = basket("inv-1");

        for _ in 0..2 {
            let mut sink = FileSink::create(dir.path(), "same").unwrap();
            sink.accept(Document::from(&b)).await.unwrap();
            sink.close().await.unwrap();
        }

        let baskets = read_pseudo_array(&dir.path().join("same_basket.json"));
        assert_eq!(baskets.len(), 2);
    }
}
