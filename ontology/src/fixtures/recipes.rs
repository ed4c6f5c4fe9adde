//! Two recipes under the top recipe class, plus a two-level task taxonomy.

/// A pristine recipe document: no synthesized restrictions yet.
///
/// - `ro:R1` (id `"42"`) and `ro:R2` (id `"43"`) are subclasses of `ro:Recipe`.
/// - `ro:R1` also carries an unrelated restriction on `ro:hasIngredient`.
/// - `ri:FoodCutting` and `ri:Mixing` hang below `dul:Task`.
pub const RECIPES: &str = r#"
@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix ro:   <http://purl.org/ProductKG/RecipeOn#> .
@prefix ri:   <http://purl.org/ProductKG/recipe-instructions#> .
@prefix dul:  <http://www.ontologydesignpatterns.org/ont/dul/DUL.owl#> .

ro:Recipe a owl:Class .

ro:Pancakes a owl:Class ;
    rdfs:subClassOf ro:Recipe ;
    rdfs:label "Pancakes"@en .

ro:R1 a owl:Class ;
    rdfs:subClassOf ro:Pancakes ;
    rdfs:subClassOf [
        a owl:Restriction ;
        owl:onProperty ro:hasIngredient ;
        owl:someValuesFrom ro:Flour
    ] ;
    ro:id "42" ;
    ro:instructions "Cut the butter. Mix flour and eggs. Pour the batter." .

ro:R2 a owl:Class ;
    rdfs:subClassOf ro:Recipe ;
    ro:id "43" ;
    ro:instructions "Slice the bread." .

dul:Task a owl:Class .

ri:FoodCutting a owl:Class ;
    rdfs:subClassOf dul:Task .

ri:Slicing a owl:Class ;
    rdfs:subClassOf ri:FoodCutting .

ri:Mixing a owl:Class ;
    rdfs:subClassOf dul:Task .
"#;
