mod fixtures;
mod options;
