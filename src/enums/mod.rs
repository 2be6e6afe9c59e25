pub mod chart_kind;
