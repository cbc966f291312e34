// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod audit;
pub mod history;
pub mod proof;
pub mod run;
