mod expr;
mod item;
mod stmt;
mod ty;
