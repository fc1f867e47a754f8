mod commit;
mod decay;
mod rain;
mod thermal;
mod wind;
