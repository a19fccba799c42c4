mod argument_parsing;
mod queries;
mod toml_config;
