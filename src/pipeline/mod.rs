// Batch pipeline over a sample of corpus documents.

pub mod batch;
