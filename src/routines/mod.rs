pub mod maps_leads_routine;
pub mod routine;
