mod rev_parse_abbreviated_ids;
mod rev_parse_names;
mod show_references;
