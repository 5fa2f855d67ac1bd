mod namespace;
mod scenarios;
