mod enums;
mod scenario;
mod validation;
