mod unit_pest_parser;
