mod db;
mod support;
