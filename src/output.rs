use crate::till::Till;
use crate::transaction::Receipt;
use arrow::array::UInt64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_csv::writer::WriterBuilder;
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Arc;

lazy_static! {
    static ref CSV_SCHEMA_REPORT: Schema = Schema::new(vec![
        Field::new("denomination", DataType::UInt64, false),
        Field::new("initial", DataType::UInt64, false),
        Field::new("remaining", DataType::UInt64, false),
        Field::new("dispensed", DataType::UInt64, false),
    ]);
}

/// One line per customer, in the order the requests arrived.
pub fn write_outcomes<W: Write>(mut writer: W, receipts: &[Receipt]) -> std::io::Result<()> {
    for receipt in receipts {
        writeln!(writer, "{}", receipt.outcome)?;
    }
    writer.flush()
}

/// Writes the till's end-of-run state as CSV, largest denomination first.
pub fn write_till_report<W: Write>(writer: W, till: &Till) -> anyhow::Result<()> {
    let mut denominations: Vec<u64> = vec![];
    let mut initial: Vec<u64> = vec![];
    let mut remaining: Vec<u64> = vec![];
    let mut dispensed: Vec<u64> = vec![];

    till.summary().iter().for_each(|row| {
        denominations.push(row.denomination.value());
        initial.push(row.initial);
        remaining.push(row.remaining);
        dispensed.push(row.dispensed());
    });

    let batch = RecordBatch::try_new(
        Arc::new(CSV_SCHEMA_REPORT.clone()),
        vec![
            Arc::new(UInt64Array::from(denominations)),
            Arc::new(UInt64Array::from(initial)),
            Arc::new(UInt64Array::from(remaining)),
            Arc::new(UInt64Array::from(dispensed)),
        ],
    )?;

    let mut writer = WriterBuilder::new().with_header(true).build(writer);
    writer.write(&batch)?;
    Ok(())
}
