pub mod lead_filter;
