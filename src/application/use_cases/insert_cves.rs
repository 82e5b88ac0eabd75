use crate::application::dto::InsertSummary;
use crate::cve_tracking::domain::key_schema::{record_key, INDEX_SCORE};
use crate::cve_tracking::domain::{MicrosoftCve, MicrosoftProduct, RetentionPolicy, VendorDocument};
use crate::cve_tracking::services::{IndexEntry, IndexPlanner, RecordCodec};
use crate::ports::outbound::{CommandBatch, ProgressReporter, RecordStore};
use crate::shared::StoreResult;

const PRODUCT_BATCH_LABEL: &str = "Microsoft product index";

/// InsertCvesUseCase - the write pipeline
///
/// Writes each record's primary hash field and its secondary index
/// memberships, applying one retention policy to every key it touches.
///
/// Each record is one pipeline. Records are written in input order and a
/// failing pipeline stops the insert; records written before it stay in the
/// store.
///
/// # Type Parameters
/// * `S` - RecordStore implementation
/// * `PR` - ProgressReporter implementation
pub struct InsertCvesUseCase<S, PR> {
    store: S,
    retention: RetentionPolicy,
    progress_reporter: PR,
}

impl<S, PR> InsertCvesUseCase<S, PR>
where
    S: RecordStore,
    PR: ProgressReporter,
{
    pub fn new(store: S, retention: RetentionPolicy, progress_reporter: PR) -> Self {
        Self {
            store,
            retention,
            progress_reporter,
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Stores vendor documents and indexes them by package (or KB id)
    ///
    /// # Errors
    /// `EncodeFailed` or `BatchExecFailed` for the first record that could not
    /// be written. `BatchExecFailed` carries how many records were committed
    /// before it.
    pub async fn insert<D: VendorDocument>(&self, records: &[D]) -> StoreResult<InsertSummary> {
        let mut summary = InsertSummary::new(D::VENDOR);
        if records.is_empty() {
            tracing::debug!(vendor = %D::VENDOR, "Nothing to insert");
            return Ok(summary);
        }

        let total = records.len();
        for (position, record) in records.iter().enumerate() {
            let (batch, memberships) = self.record_batch(record)?;
            tracing::debug!(
                cve_id = record.cve_id(),
                commands = batch.len(),
                "Writing record"
            );

            if let Err(e) = self.store.execute(batch).await {
                let e = e.with_committed(summary.records);
                self.progress_reporter
                    .report_error(&format!("❌ Failed to store {}", record.cve_id()));
                return Err(e);
            }

            summary.records += 1;
            summary.index_memberships += memberships;
            self.progress_reporter
                .report_progress(position + 1, total, Some(record.cve_id()));
        }

        tracing::info!(
            vendor = %D::VENDOR,
            records = summary.records,
            index_memberships = summary.index_memberships,
            retention = %self.retention,
            "Inserted CVE records"
        );
        self.progress_reporter
            .report_completion(&format!("✅ Stored {}", summary));
        Ok(summary)
    }

    /// Stores Microsoft records: the product-id to product-name index first,
    /// then the CVE records with their KB indexes.
    pub async fn insert_microsoft(
        &self,
        cves: &[MicrosoftCve],
        products: &[MicrosoftProduct],
    ) -> StoreResult<InsertSummary> {
        let entries = IndexPlanner::plan_products(products);
        if !entries.is_empty() {
            self.progress_reporter.report(&format!(
                "📦 Indexing {} Microsoft product name(s)...",
                entries.len()
            ));
            let batch = self.index_batch(PRODUCT_BATCH_LABEL, &entries);
            tracing::debug!(commands = batch.len(), "Writing product index");
            self.store.execute(batch).await?;
        }

        let mut summary = self.insert(cves).await?;
        summary.product_memberships = entries.len();
        Ok(summary)
    }

    fn record_batch<D: VendorDocument>(&self, record: &D) -> StoreResult<(CommandBatch, usize)> {
        let json = RecordCodec::encode(record)?;
        let key = record_key(record.cve_id());

        let mut batch = CommandBatch::new(record.cve_id());
        batch
            .hash_set(&key, D::VENDOR.field_name(), json)
            .retain(&key, self.retention);

        let entries = IndexPlanner::plan(record);
        self.add_index_entries(&mut batch, &entries);
        Ok((batch, entries.len()))
    }

    fn index_batch(&self, label: &str, entries: &[IndexEntry]) -> CommandBatch {
        let mut batch = CommandBatch::new(label);
        self.add_index_entries(&mut batch, entries);
        batch
    }

    fn add_index_entries(&self, batch: &mut CommandBatch, entries: &[IndexEntry]) {
        for entry in entries {
            batch
                .sorted_set_add(&entry.key, &entry.member, INDEX_SCORE)
                .retain(&entry.key, self.retention);
        }
    }
}
