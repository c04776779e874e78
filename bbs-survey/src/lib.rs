pub mod error;
pub mod observation;
pub mod route;
pub mod species;
pub mod yearly_total;
pub mod years;
