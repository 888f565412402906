mod buffer_proptest;
mod concurrency;
mod split;
