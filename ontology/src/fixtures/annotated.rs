//! A recipe carrying restrictions from an earlier annotation run.

/// `ro:R1` annotated with `[Cutting, Mixing]`: one single restriction and one
/// intersection, plus an equivalence anchored on `ro:R1` that mixes a task
/// restriction with an unrelated one.
pub const ANNOTATED_RECIPE: &str = r#"
@prefix rdf:  <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix ro:   <http://purl.org/ProductKG/RecipeOn#> .
@prefix soma: <http://www.ease-crc.org/ont/SOMA.owl#> .
@prefix ri:   <http://purl.org/ProductKG/recipe-instructions#> .

ro:Recipe a owl:Class .

ro:R1 a owl:Class ;
    rdfs:subClassOf ro:Recipe ;
    ro:id "42" ;
    rdfs:subClassOf [
        a owl:Restriction ;
        owl:onProperty soma:includes_task ;
        owl:someValuesFrom soma:Cutting
    ] ;
    rdfs:subClassOf [
        a owl:Class ;
        owl:intersectionOf (
            [ a owl:Restriction ; owl:onProperty soma:has_prior_task ; owl:someValuesFrom soma:Cutting ]
            [ a owl:Restriction ; owl:onProperty soma:includes_task ; owl:someValuesFrom ri:Mixing ]
        )
    ] ;
    owl:equivalentClass [
        a owl:Class ;
        owl:intersectionOf (
            [ a owl:Restriction ; owl:onProperty ro:hasIngredient ; owl:someValuesFrom ro:Flour ]
            [ a owl:Restriction ; owl:onProperty soma:includes_task ; owl:someValuesFrom soma:Dicing ]
        )
    ] .
"#;
