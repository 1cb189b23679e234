mod delete_many_input;
mod delete_one_input;
mod delete_response;
mod filter;

pub use self::{
    delete_many_input::{delete_many_input_type, DeleteManyInput, DeleteManyInputType, INPUT_FIELD_FILTER},
    delete_one_input::{DeleteOneInput, DeleteOneInputType, INPUT_FIELD_ID},
    delete_response::{
        delete_many_response_type, delete_one_response_type, DELETE_MANY_RESPONSE_TYPE, OUTPUT_FIELD_DELETED_COUNT,
    },
    filter::{
        comparison_type, ComparisonOperator, DefaultFilterTypes, FieldComparison, Filter, FilterType,
        FilterTypeFactory, INPUT_FIELD_AND, INPUT_FIELD_OR,
    },
};
