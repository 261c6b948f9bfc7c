mod write_commit_object_successfully_for_nested_project;
mod write_second_commit_with_parent;
